//! Declaration aggregator
//!
//! Merges the transpiler's consolidated declaration output and every per-file
//! `.d.ts` under the three scope trees into a single artifact at
//! `<types>/<id>.d.ts`. Runs on demand over the full source tree, never per
//! watch event. If there is nothing to export, a stale artifact is deleted
//! instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::banner::Templates;
use crate::config::Config;
use crate::error::BuildResult;
use crate::manifest::Manifest;
use crate::scope::SCOPE_DIRS;
use crate::transpiler::Transpiler;

/// Merge declarations and write the artifact
///
/// Returns the artifact path, or `None` when there was nothing to export (in
/// which case any previously generated artifact has been removed).
pub fn aggregate(
    root: &Path,
    config: &Config,
    manifest: &Manifest,
    transpiler: &dyn Transpiler,
) -> BuildResult<Option<PathBuf>> {
    let source_dir = root.join(&config.paths.source);
    let dest = root
        .join(&config.paths.types)
        .join(format!("{}.d.ts", manifest.id));

    let consolidated = transpiler.emit_declarations(&root.join(&config.transpiler.project))?;
    let consolidated = strip_empty_modules(&consolidated);
    let per_file = collect_scope_declarations(&source_dir)?;

    if consolidated.is_empty() && per_file.is_empty() {
        if dest.is_file() {
            fs::remove_file(&dest)?;
        }
        return Ok(None);
    }

    let templates = Templates::load(&source_dir, config, manifest)?;
    let mut merged = String::new();
    if let Some(header) = &templates.header {
        push_section(&mut merged, header);
    }
    if !consolidated.is_empty() {
        push_section(&mut merged, &consolidated);
    }
    for (origin, content) in &per_file {
        push_section(&mut merged, &format!("// {origin}\n{}", content.trim_end()));
    }
    if let Some(footer) = &templates.footer {
        push_section(&mut merged, footer);
    }

    let merged = flatten_scope_prefixes(&merged);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, merged)?;
    Ok(Some(dest))
}

fn push_section(out: &mut String, section: &str) {
    out.push_str(section);
    if !section.ends_with('\n') {
        out.push('\n');
    }
}

/// Drop empty ambient-module blocks and blank lines
pub fn strip_empty_modules(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            i += 1;
            continue;
        }
        if line.starts_with("declare module ") {
            // Single-line empty block.
            if line.ends_with("{}") || line.ends_with("{ }") {
                i += 1;
                continue;
            }
            // Opener followed (blank lines aside) by a bare closer.
            if line.ends_with('{') {
                let mut j = i + 1;
                while j < lines.len() && lines[j].trim().is_empty() {
                    j += 1;
                }
                if j < lines.len() && lines[j].trim() == "}" {
                    i = j + 1;
                    continue;
                }
            }
        }
        kept.push(lines[i]);
        i += 1;
    }

    if kept.is_empty() {
        String::new()
    } else {
        let mut out = kept.join("\n");
        out.push('\n');
        out
    }
}

/// Collect every per-file declaration under the scope trees, sorted by path
pub fn collect_scope_declarations(source_dir: &Path) -> BuildResult<Vec<(String, String)>> {
    let mut found = Vec::new();
    for scope_dir in SCOPE_DIRS {
        let dir = source_dir.join(scope_dir);
        if !dir.is_dir() {
            continue;
        }
        collect_recursive(source_dir, &dir, &mut found)?;
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}

fn collect_recursive(
    source_dir: &Path,
    dir: &Path,
    found: &mut Vec<(String, String)>,
) -> BuildResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_recursive(source_dir, &path, found)?;
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".d.ts") {
            continue;
        }
        let origin = path
            .strip_prefix(source_dir)
            .unwrap_or(&path)
            .to_string_lossy()
            .replace('\\', "/");
        found.push((origin, fs::read_to_string(&path)?));
    }
    Ok(())
}

/// Remove scope-directory prefixes from module-declaration and import forms,
/// flattening the merged namespace the same way runtime references are
const PREFIX_FORMS: [&str; 4] = ["module \"", "from \"", "import(\"", "require(\""];

pub fn flatten_scope_prefixes(content: &str) -> String {
    let mut out = content.to_string();
    for form in PREFIX_FORMS {
        for scope_dir in SCOPE_DIRS {
            let scoped = format!("{form}{scope_dir}/");
            if out.contains(&scoped) {
                out = out.replace(&scoped, form);
            }
        }
    }
    out
}
