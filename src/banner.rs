//! Banner and template handling
//!
//! Three optional free-text templates live at the source root: a header and
//! footer wrapped around post-processed artifacts, and the deferred-reimport
//! block template. All three degrade gracefully when absent.
//!
//! Tokens substituted from project metadata: `{{id}}`, `{{name}}`, `{{poster}}`,
//! `{{description}}`, `{{dependencies}}`, `{{year}}`, `{{timestamp}}`.

use std::fs;
use std::path::Path;

use chrono::Local;

use crate::config::Config;
use crate::error::BuildResult;
use crate::manifest::Manifest;

/// Substitution marker inside the reimport template
pub const REIMPORT_BODY_MARKER: &str = "{{body}}";

/// Loaded, token-expanded templates for one build
#[derive(Debug, Clone, Default)]
pub struct Templates {
    /// Banner prefix, already expanded
    pub header: Option<String>,
    /// Banner suffix, already expanded
    pub footer: Option<String>,
    /// Deferred-reimport block, expanded except for the `{{body}}` marker
    pub reimport: Option<String>,
}

impl Templates {
    /// Read the template files under the source root, expanding metadata
    /// tokens. Missing files yield `None` for the corresponding template.
    pub fn load(source_dir: &Path, config: &Config, manifest: &Manifest) -> BuildResult<Templates> {
        let read = |name: &str| -> BuildResult<Option<String>> {
            let path = source_dir.join(name);
            if !path.is_file() {
                return Ok(None);
            }
            Ok(Some(expand_tokens(&fs::read_to_string(path)?, manifest)))
        };

        Ok(Templates {
            header: read(&config.banner.header)?,
            footer: read(&config.banner.footer)?,
            reimport: read(&config.reimport.template)?,
        })
    }

    /// Wrap content in the header/footer banner, when configured
    pub fn wrap(&self, content: &str) -> String {
        if self.header.is_none() && self.footer.is_none() {
            return content.to_string();
        }
        let mut out = String::with_capacity(content.len() + 256);
        if let Some(header) = &self.header {
            push_line(&mut out, header);
        }
        push_line(&mut out, content);
        if let Some(footer) = &self.footer {
            push_line(&mut out, footer);
        }
        out
    }
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
}

/// Substitute `{{token}}` markers from project metadata and the clock
pub fn expand_tokens(template: &str, manifest: &Manifest) -> String {
    let now = Local::now();
    let substitutions = [
        ("{{id}}", manifest.id.clone()),
        ("{{name}}", manifest.name.clone()),
        ("{{poster}}", manifest.poster.clone()),
        ("{{description}}", manifest.description.clone()),
        ("{{dependencies}}", manifest.dependencies.join(", ")),
        ("{{year}}", now.format("%Y").to_string()),
        ("{{timestamp}}", now.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];

    let mut out = template.to_string();
    for (token, value) in substitutions {
        if out.contains(token) {
            out = out.replace(token, &value);
        }
    }
    out
}
