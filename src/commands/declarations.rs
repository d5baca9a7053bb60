use std::path::Path;

use anyhow::Result;

use lunabuild::config::{Config, CONFIG_FILE};
use lunabuild::declarations::aggregate;
use lunabuild::manifest::{Manifest, MANIFEST_FILE};
use lunabuild::transpiler::ProcessTranspiler;

use super::TAG_BUILD;

pub fn cmd_declarations(project: &Path, json: bool) -> Result<()> {
    let manifest = Manifest::load(&project.join(MANIFEST_FILE))?;
    let config = Config::load(&project.join(CONFIG_FILE))?;
    let transpiler = ProcessTranspiler::from_config(&config.transpiler);

    let written = aggregate(project, &config, &manifest, &transpiler)?;

    if json {
        println!("{}", declarations_json(written.as_deref()));
    } else {
        match written {
            Some(path) => println!("{TAG_BUILD} declarations written to {}", path.display()),
            None => println!("{TAG_BUILD} no declarations to export"),
        }
    }
    Ok(())
}

fn declarations_json(written: Option<&Path>) -> String {
    match written {
        Some(path) => serde_json::json!({
            "event": "declarations_written",
            "path": path.display().to_string(),
        })
        .to_string(),
        None => serde_json::json!({ "event": "declarations_empty" }).to_string(),
    }
}
