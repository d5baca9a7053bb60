//! Full build pipeline
//!
//! One [`BuildRun`] per invocation: invoke the transpiler once, then for every
//! emitted module run the reference resolver, the deferred-reimport injector
//! and banner wrapping, and write the result into the output tree. Runs are
//! independent and idempotent: the same source tree produces the same output
//! tree, modulo timestamps embedded in banners. Declaration-flagged emissions
//! and emissions with empty content are ignored here; declarations are merged
//! separately by the aggregator.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::banner::Templates;
use crate::config::Config;
use crate::error::BuildResult;
use crate::manifest::Manifest;
use crate::reimport;
use crate::resolver::{self, ScopeViolation};
use crate::scope::Scope;
use crate::transpiler::Transpiler;

/// Outcome of one full pipeline run
#[derive(Debug, Clone)]
pub struct BuildRun {
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    /// Emitted modules written to the output tree
    pub modules: usize,
    /// Non-fatal cross-scope diagnostics, in emission order
    pub violations: Vec<ScopeViolation>,
}

impl BuildRun {
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished - self.started).num_milliseconds()
    }
}

/// Run the full pipeline over the project rooted at `root`
///
/// Templates are re-read here, at the top of the build, so edits to the
/// header/footer/reimport templates take effect on the next run without a
/// restart.
pub fn run_build(
    root: &Path,
    config: &Config,
    manifest: &Manifest,
    transpiler: &dyn Transpiler,
) -> BuildResult<BuildRun> {
    let started = Local::now();

    let source_dir = root.join(&config.paths.source);
    let out_dir = root.join(&config.paths.out);
    let templates = Templates::load(&source_dir, config, manifest)?;

    let mut modules = 0usize;
    let mut violations = Vec::new();

    transpiler.emit(&root.join(&config.transpiler.project), &mut |unit| {
        if unit.is_declaration || unit.content.is_empty() {
            return Ok(());
        }

        let scope = Scope::of_path(&unit.path);
        let (resolved, mut found) = resolver::rewrite_module(scope, &unit.content);
        violations.append(&mut found);

        let repaired = reimport::inject(
            &resolved,
            &config.reimport.namespace,
            templates.reimport.as_deref(),
        );

        let written = if is_lua(&unit.path) {
            templates.wrap(&repaired)
        } else {
            repaired.into_owned()
        };

        let dest = out_dir.join(&unit.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, written)?;
        modules += 1;
        Ok(())
    })?;

    Ok(BuildRun {
        started,
        finished: Local::now(),
        modules,
        violations,
    })
}

pub(crate) fn is_lua(path: &Path) -> bool {
    path.extension().map(|e| e == "lua").unwrap_or(false)
}
