//! Configuration for lunabuild
//!
//! Loaded from `lunabuild.toml` at the project root. Every field has a default
//! so the file is optional. The config is re-read at the top of every build and
//! threaded by value into the pipeline, so a build is a pure function of
//! (source tree, config, manifest).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, BuildResult};

/// Default config filename at the project root
pub const CONFIG_FILE: &str = "lunabuild.toml";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub transpiler: TranspilerConfig,

    #[serde(default)]
    pub reimport: ReimportConfig,

    #[serde(default)]
    pub banner: BannerConfig,
}

/// Source and output tree locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source_dir")]
    pub source: PathBuf,

    #[serde(default = "default_out_dir")]
    pub out: PathBuf,

    #[serde(default = "default_types_dir")]
    pub types: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source_dir(),
            out: default_out_dir(),
            types: default_types_dir(),
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_types_dir() -> PathBuf {
    PathBuf::from("types")
}

/// External transpiler invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspilerConfig {
    /// Command to invoke
    #[serde(default = "default_transpiler_command")]
    pub command: String,

    /// Project configuration locator passed via `--project`
    #[serde(default = "default_transpiler_project")]
    pub project: PathBuf,
}

impl Default for TranspilerConfig {
    fn default() -> Self {
        Self {
            command: default_transpiler_command(),
            project: default_transpiler_project(),
        }
    }
}

fn default_transpiler_command() -> String {
    "tstl".to_string()
}

fn default_transpiler_project() -> PathBuf {
    PathBuf::from("tsconfig.json")
}

/// Deferred reimport repair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReimportConfig {
    /// Reserved prefix of the lazily-initialized host namespace
    #[serde(default = "default_reimport_namespace")]
    pub namespace: String,

    /// Template filename under the source root; the template must contain a
    /// single `{{body}}` marker
    #[serde(default = "default_reimport_template")]
    pub template: String,
}

impl Default for ReimportConfig {
    fn default() -> Self {
        Self {
            namespace: default_reimport_namespace(),
            template: default_reimport_template(),
        }
    }
}

fn default_reimport_namespace() -> String {
    "GameAPI".to_string()
}

fn default_reimport_template() -> String {
    "reimport.lua".to_string()
}

/// Banner template filenames under the source root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_header_name")]
    pub header: String,

    #[serde(default = "default_footer_name")]
    pub footer: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            header: default_header_name(),
            footer: default_footer_name(),
        }
    }
}

fn default_header_name() -> String {
    "header.lua".to_string()
}

fn default_footer_name() -> String {
    "footer.lua".to_string()
}

impl Config {
    /// Load config from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> BuildResult<Config> {
        if !path.is_file() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Filenames in the source root that are template inputs, never compiled
    /// or mirrored on their own
    pub fn reserved_names(&self) -> [&str; 3] {
        [
            self.banner.header.as_str(),
            self.banner.footer.as_str(),
            self.reimport.template.as_str(),
        ]
    }
}
