use std::path::Path;

use anyhow::Result;

use lunabuild::config::{Config, CONFIG_FILE};
use lunabuild::manifest::{Manifest, MANIFEST_FILE};
use lunabuild::pipeline::run_build;
use lunabuild::transpiler::ProcessTranspiler;
use lunabuild::watcher::WatchNotice;

use super::TAG_BUILD;

pub fn cmd_build(project: &Path, json: bool, verbose: u8) -> Result<()> {
    let manifest = Manifest::load(&project.join(MANIFEST_FILE))?;
    let config = Config::load(&project.join(CONFIG_FILE))?;
    let transpiler = ProcessTranspiler::from_config(&config.transpiler);

    if !json && verbose > 0 {
        println!("{TAG_BUILD} project '{}' ({})", manifest.name, manifest.id);
    }

    let run = run_build(project, &config, &manifest, &transpiler)?;

    for violation in &run.violations {
        if json {
            eprintln!(
                "{}",
                WatchNotice::Warning {
                    message: violation.to_string(),
                }
                .to_json()
            );
        } else {
            eprintln!("{TAG_BUILD} warning: {violation}");
        }
    }

    if json {
        println!(
            "{}",
            WatchNotice::BuildComplete {
                modules: run.modules,
                warnings: run.violations.len(),
                elapsed_ms: run.elapsed_ms(),
            }
            .to_json()
        );
    } else {
        println!(
            "{TAG_BUILD} {} modules, {} warnings in {}ms",
            run.modules,
            run.violations.len(),
            run.elapsed_ms()
        );
    }
    Ok(())
}
