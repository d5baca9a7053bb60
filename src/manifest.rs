//! Project manifest parsing
//!
//! The manifest is a plain key-value file (`manifest.cfg`) at the project root:
//!
//! ```text
//! # my mod
//! id = sandbox-race
//! name = Sandbox Race
//! poster = ada
//! description = Checkpoint racing for the sandbox host
//! dependencies = base-lib, net-lib
//! ```
//!
//! `id`, `name`, `poster` and `description` are required; a missing one is a
//! fatal startup error. `dependencies` may be absent or empty.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, BuildResult};

/// Default manifest filename at the project root
pub const MANIFEST_FILE: &str = "manifest.cfg";

/// Project metadata read from the key-value manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Project identifier (also names the merged declaration artifact)
    pub id: String,
    /// Display name
    pub name: String,
    /// Author / poster string for banners
    pub poster: String,
    /// Short description
    pub description: String,
    /// Dependency identifiers, possibly empty
    pub dependencies: Vec<String>,
}

impl Manifest {
    /// Load and validate a manifest file
    pub fn load(path: &Path) -> BuildResult<Manifest> {
        if !path.is_file() {
            return Err(BuildError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        parse_manifest(&content, path)
    }
}

/// Parse manifest content, validating required fields
pub fn parse_manifest(content: &str, file: &Path) -> BuildResult<Manifest> {
    let mut fields: HashMap<String, String> = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| BuildError::InvalidManifest {
            file: file.to_path_buf(),
            line: index + 1,
            message: "expected 'key = value'".to_string(),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(BuildError::InvalidManifest {
                file: file.to_path_buf(),
                line: index + 1,
                message: "empty key".to_string(),
            });
        }
        fields.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    let required = |field: &str| -> BuildResult<String> {
        fields
            .get(field)
            .filter(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| BuildError::MissingManifestField {
                field: field.to_string(),
                file: file.to_path_buf(),
            })
    };

    let id = required("id")?;
    let name = required("name")?;
    let poster = required("poster")?;
    let description = required("description")?;

    let dependencies = fields
        .get("dependencies")
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Manifest {
        id,
        name,
        poster,
        description,
        dependencies,
    })
}

/// Strip one pair of surrounding double quotes, if present
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
