//! Incremental build controller
//!
//! A single-threaded state machine driven by filesystem watch events. Events
//! are processed one at a time in arrival order; there is no coalescing,
//! debouncing or reordering here (debouncing, if any, is the watch layer's
//! business). A source-module change triggers a full synchronous rebuild of
//! the whole tree; assets are mirror-copied; deletions and directory events
//! are mirrored. No second build can start while one is in progress because
//! the loop only picks up the next event after the current one returns.
//!
//! A failed build does not kill the loop: the error is reported and the next
//! event can retry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind};
use notify::{Config as NotifyConfig, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Serialize;

use crate::banner::Templates;
use crate::config::{Config, CONFIG_FILE};
use crate::error::{BuildError, BuildResult};
use crate::manifest::Manifest;
use crate::mirror;
use crate::pipeline::run_build;
use crate::transpiler::Transpiler;

/// Watch event kinds, as delivered by the filesystem watch layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    Add,
    Change,
    Unlink,
    AddDir,
    UnlinkDir,
}

/// One filesystem change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchKind,
    pub path: PathBuf,
}

/// What the controller decided for one event
#[derive(Debug)]
pub enum EventOutcome {
    /// Source-module change; the caller runs the full pipeline
    RebuildNeeded,
    /// Asset mirror-copied to this destination
    Copied(PathBuf),
    /// Mirrored file or directory removed
    Removed(PathBuf),
    /// Mirrored directory created
    CreatedDir(PathBuf),
    /// Nothing to do
    Ignored,
}

/// Notices surfaced to the UI layer (NDJSON in `--json` mode)
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchNotice {
    Started { source: String },
    FileChanged { path: String },
    BuildStarted,
    BuildComplete { modules: usize, warnings: usize, elapsed_ms: i64 },
    Warning { message: String },
    Error { message: String },
    Shutdown,
}

impl WatchNotice {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Options for watch mode
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root containing manifest, config, source and output trees
    pub root: PathBuf,
}

/// Translate one notify event into controller events
pub fn map_notify_event(event: &notify::Event) -> Vec<WatchEvent> {
    let kind = match event.kind {
        EventKind::Create(CreateKind::Folder) => WatchKind::AddDir,
        EventKind::Create(_) => WatchKind::Add,
        EventKind::Modify(ModifyKind::Metadata(_)) => return Vec::new(),
        EventKind::Modify(_) => WatchKind::Change,
        EventKind::Remove(RemoveKind::Folder) => WatchKind::UnlinkDir,
        EventKind::Remove(_) => WatchKind::Unlink,
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .map(|path| {
            // Watch backends that only report Create(Any) still need folder
            // adds mirrored as directories.
            let kind = if kind == WatchKind::Add && path.is_dir() {
                WatchKind::AddDir
            } else {
                kind
            };
            WatchEvent {
                kind,
                path: path.clone(),
            }
        })
        .collect()
}

/// Process one event against the dispatch table
///
/// Mirror actions (asset copy, unlink, directory create/remove) are performed
/// here; a source-module change is only classified, the caller runs the build.
pub fn handle_event(
    root: &Path,
    config: &Config,
    manifest: &Manifest,
    event: &WatchEvent,
) -> BuildResult<EventOutcome> {
    let source_dir = root.join(&config.paths.source);
    let out_dir = root.join(&config.paths.out);

    // Template inputs are never independent compilable units.
    if let Some(name) = event.path.file_name().and_then(|n| n.to_str()) {
        if config.reserved_names().contains(&name) {
            return Ok(EventOutcome::Ignored);
        }
    }

    let Some(mirrored) = mirror::mirror_path(&source_dir, &out_dir, &event.path) else {
        return Ok(EventOutcome::Ignored);
    };

    match event.kind {
        WatchKind::Add | WatchKind::Change => {
            if mirror::is_source_module(&event.path) {
                // Per-file trigger, whole-tree action: a full rebuild avoids
                // the dependency graph a partial rebuild would need.
                Ok(EventOutcome::RebuildNeeded)
            } else if mirror::is_asset(&event.path) {
                let templates = Templates::load(&source_dir, config, manifest)?;
                mirror::copy_asset(&event.path, &mirrored, &templates)?;
                Ok(EventOutcome::Copied(mirrored))
            } else {
                Ok(EventOutcome::Ignored)
            }
        }
        WatchKind::Unlink => {
            if mirror::remove_mirror(&mirrored)? {
                Ok(EventOutcome::Removed(mirror::unlink_target(&mirrored)))
            } else {
                Ok(EventOutcome::Ignored)
            }
        }
        WatchKind::UnlinkDir => {
            if mirror::remove_mirror_dir(&mirrored)? {
                Ok(EventOutcome::Removed(mirrored))
            } else {
                Ok(EventOutcome::Ignored)
            }
        }
        WatchKind::AddDir => {
            if mirror::create_mirror_dir(&mirrored)? {
                Ok(EventOutcome::CreatedDir(mirrored))
            } else {
                Ok(EventOutcome::Ignored)
            }
        }
    }
}

/// Enter watch mode: initial full build, then the event loop
///
/// Config and templates are re-read at the top of every build so live edits
/// take effect without a restart. The loop exits when `running` is cleared.
pub fn watch(
    options: WatchOptions,
    manifest: &Manifest,
    transpiler: &dyn Transpiler,
    running: Arc<AtomicBool>,
    callback: impl Fn(WatchNotice),
) -> BuildResult<()> {
    let config = Config::load(&options.root.join(CONFIG_FILE))?;
    let source_dir = options.root.join(&config.paths.source);
    if !source_dir.is_dir() {
        return Err(BuildError::DirectoryNotFound { path: source_dir });
    }

    callback(WatchNotice::Started {
        source: source_dir.display().to_string(),
    });

    // Initial full build. A failure is reported but keeps the loop alive so
    // the next change can retry.
    report_build(&options.root, &config, manifest, transpiler, &callback);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                for mapped in map_notify_event(&event) {
                    let _ = tx.send(mapped);
                }
            }
        },
        NotifyConfig::default(),
    )
    .map_err(|e| BuildError::Watch(e.to_string()))?;

    watcher
        .watch(&source_dir, RecursiveMode::Recursive)
        .map_err(|e| BuildError::Watch(e.to_string()))?;

    while running.load(Ordering::SeqCst) {
        let Ok(event) = rx.recv_timeout(Duration::from_millis(50)) else {
            continue;
        };

        let config = match Config::load(&options.root.join(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                callback(WatchNotice::Error {
                    message: e.to_string(),
                });
                continue;
            }
        };

        match handle_event(&options.root, &config, manifest, &event) {
            Ok(EventOutcome::Ignored) => {}
            Ok(EventOutcome::RebuildNeeded) => {
                callback(WatchNotice::FileChanged {
                    path: event.path.display().to_string(),
                });
                report_build(&options.root, &config, manifest, transpiler, &callback);
            }
            Ok(_) => callback(WatchNotice::FileChanged {
                path: event.path.display().to_string(),
            }),
            Err(e) => callback(WatchNotice::Error {
                message: e.to_string(),
            }),
        }
    }

    callback(WatchNotice::Shutdown);
    Ok(())
}

fn report_build(
    root: &Path,
    config: &Config,
    manifest: &Manifest,
    transpiler: &dyn Transpiler,
    callback: &impl Fn(WatchNotice),
) {
    callback(WatchNotice::BuildStarted);
    match run_build(root, config, manifest, transpiler) {
        Ok(run) => {
            for violation in &run.violations {
                callback(WatchNotice::Warning {
                    message: violation.to_string(),
                });
            }
            callback(WatchNotice::BuildComplete {
                modules: run.modules,
                warnings: run.violations.len(),
                elapsed_ms: run.elapsed_ms(),
            });
        }
        Err(e) => callback(WatchNotice::Error {
            message: e.to_string(),
        }),
    }
}
