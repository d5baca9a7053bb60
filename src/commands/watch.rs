use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use lunabuild::config::{Config, CONFIG_FILE};
use lunabuild::manifest::{Manifest, MANIFEST_FILE};
use lunabuild::transpiler::ProcessTranspiler;
use lunabuild::watcher::{watch, WatchNotice, WatchOptions};

use super::TAG_WATCH;

pub fn cmd_watch(project: &Path, json: bool) -> Result<()> {
    let manifest = Manifest::load(&project.join(MANIFEST_FILE))?;
    let config = Config::load(&project.join(CONFIG_FILE))?;
    let transpiler = ProcessTranspiler::from_config(&config.transpiler);

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let options = WatchOptions {
        root: project.to_path_buf(),
    };

    watch(options, &manifest, &transpiler, running, |notice| {
        if json {
            println!("{}", notice.to_json());
            return;
        }
        match &notice {
            WatchNotice::Started { source } => {
                println!("{TAG_WATCH} watching {source} (Ctrl+C to stop)");
            }
            WatchNotice::FileChanged { path } => {
                println!("{TAG_WATCH} changed: {path}");
            }
            WatchNotice::BuildStarted => {
                println!("{TAG_WATCH} building...");
            }
            WatchNotice::BuildComplete {
                modules,
                warnings,
                elapsed_ms,
            } => {
                println!("{TAG_WATCH} {modules} modules, {warnings} warnings in {elapsed_ms}ms");
            }
            WatchNotice::Warning { message } => {
                eprintln!("{TAG_WATCH} warning: {message}");
            }
            WatchNotice::Error { message } => {
                eprintln!("{TAG_WATCH} error: {message}");
            }
            WatchNotice::Shutdown => {
                println!("{TAG_WATCH} stopped");
            }
        }
    })?;

    Ok(())
}
