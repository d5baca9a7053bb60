//! Asset and directory mirroring
//!
//! Non-source assets in the source tree are mirrored into the output tree at
//! the same relative path. Deletions and directory events are mirrored the
//! same way; a deleted source module translates to its emitted artifact
//! (`.ts` becomes `.lua`) before the mirrored file is removed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::banner::Templates;
use crate::error::BuildResult;
use crate::pipeline::is_lua;

/// Extensions mirrored as plain assets
const ASSET_EXTENSIONS: [&str; 3] = ["lua", "json", "txt"];

/// True for files the build controller treats as mirrorable assets
pub fn is_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ASSET_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// True for compilable source modules (`.ts`, excluding declaration-only files)
pub fn is_source_module(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

/// Map a path inside the source tree to its mirror in the output tree
///
/// Returns `None` for paths outside the source tree.
pub fn mirror_path(source_dir: &Path, out_dir: &Path, path: &Path) -> Option<PathBuf> {
    let relative = path.strip_prefix(source_dir).ok()?;
    Some(out_dir.join(relative))
}

/// Copy an asset into the output tree, banner-wrapping post-processable
/// destinations (`.lua`)
pub fn copy_asset(source: &Path, dest: &Path, templates: &Templates) -> BuildResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    if is_lua(dest) {
        let content = fs::read_to_string(source)?;
        fs::write(dest, templates.wrap(&content))?;
    } else {
        fs::copy(source, dest)?;
    }
    Ok(())
}

/// Translate a deleted source path to the mirrored artifact to remove
///
/// `.ts` modules map to their emitted `.lua`; everything else maps verbatim.
pub fn unlink_target(mirror: &Path) -> PathBuf {
    if is_source_module(mirror) {
        mirror.with_extension("lua")
    } else {
        mirror.to_path_buf()
    }
}

/// Remove the mirrored counterpart of a deleted source path, if present
pub fn remove_mirror(mirror: &Path) -> BuildResult<bool> {
    let target = unlink_target(mirror);
    if target.is_dir() {
        fs::remove_dir_all(&target)?;
        return Ok(true);
    }
    if target.is_file() {
        fs::remove_file(&target)?;
        return Ok(true);
    }
    Ok(false)
}

/// Remove a mirrored directory, if present
pub fn remove_mirror_dir(mirror: &Path) -> BuildResult<bool> {
    if mirror.is_dir() {
        fs::remove_dir_all(mirror)?;
        return Ok(true);
    }
    Ok(false)
}

/// Create a mirrored directory unless it already exists
pub fn create_mirror_dir(mirror: &Path) -> BuildResult<bool> {
    if mirror.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(mirror)?;
    Ok(true)
}
