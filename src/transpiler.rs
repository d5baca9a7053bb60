//! External transpiler interface
//!
//! The transpiler is a black box invoked with a project configuration locator.
//! It hands back one [`EmitUnit`] per emitted file. The production
//! implementation shells out to the configured command, stages its output in a
//! scratch directory, then walks the staging tree and feeds each file to the
//! sink. Tests substitute their own in-memory implementations of the trait.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::TranspilerConfig;
use crate::error::{BuildError, BuildResult};

/// One emitted file from the transpiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitUnit {
    /// Output path relative to the output root
    pub path: PathBuf,
    /// Emitted content
    pub content: String,
    /// True for declaration artifacts (`.d.ts`), handled by aggregation only
    pub is_declaration: bool,
}

/// Sink receiving emitted units in emission order
pub type EmitSink<'a> = dyn FnMut(EmitUnit) -> BuildResult<()> + 'a;

/// Abstract transpiler invocation
pub trait Transpiler {
    /// Run a full emit over the project, feeding every unit to the sink
    fn emit(&self, project: &Path, sink: &mut EmitSink) -> BuildResult<()>;

    /// Run declaration-only mode, producing one consolidated declaration file.
    /// An empty string means the project exports no declarations.
    fn emit_declarations(&self, project: &Path) -> BuildResult<String>;
}

/// Production transpiler invoked as a subprocess
#[derive(Debug, Clone)]
pub struct ProcessTranspiler {
    command: String,
}

impl ProcessTranspiler {
    pub fn from_config(config: &TranspilerConfig) -> Self {
        Self {
            command: config.command.clone(),
        }
    }

    fn run(&self, project: &Path, extra_args: &[&str], staging: &Path) -> BuildResult<()> {
        let output = Command::new(&self.command)
            .arg("--project")
            .arg(project)
            .arg("--outDir")
            .arg(staging)
            .args(extra_args)
            .output()?;
        if !output.status.success() {
            return Err(BuildError::TranspilerFailed {
                command: self.command.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl Transpiler for ProcessTranspiler {
    fn emit(&self, project: &Path, sink: &mut EmitSink) -> BuildResult<()> {
        let staging = tempfile::tempdir()?;
        self.run(project, &[], staging.path())?;
        walk_emitted(staging.path(), staging.path(), sink)
    }

    fn emit_declarations(&self, project: &Path) -> BuildResult<String> {
        let staging = tempfile::tempdir()?;
        self.run(project, &["--emitDeclarationOnly", "true"], staging.path())?;
        let bundle = staging.path().join("bundle.d.ts");
        if !bundle.is_file() {
            return Ok(String::new());
        }
        Ok(fs::read_to_string(bundle)?)
    }
}

/// Walk a staged output tree in sorted order, feeding files to the sink
fn walk_emitted(root: &Path, dir: &Path, sink: &mut EmitSink) -> BuildResult<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk_emitted(root, &path, sink)?;
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        let is_declaration = relative
            .to_str()
            .map(|p| p.ends_with(".d.ts"))
            .unwrap_or(false);
        sink(EmitUnit {
            path: relative,
            content: fs::read_to_string(&path)?,
            is_declaration,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_emitted_sorted_and_flagged() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("client")).unwrap();
        fs::write(dir.path().join("client/b.lua"), "b").unwrap();
        fs::write(dir.path().join("client/a.lua"), "a").unwrap();
        fs::write(dir.path().join("client/a.d.ts"), "declare const a: number;").unwrap();

        let mut seen = Vec::new();
        walk_emitted(dir.path(), dir.path(), &mut |unit| {
            seen.push((unit.path.clone(), unit.is_declaration));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (PathBuf::from("client/a.d.ts"), true),
                (PathBuf::from("client/a.lua"), false),
                (PathBuf::from("client/b.lua"), false),
            ]
        );
    }

    #[test]
    fn test_walk_emitted_sink_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.lua"), "a").unwrap();

        let result = walk_emitted(dir.path(), dir.path(), &mut |_| {
            Err(BuildError::Watch("boom".to_string()))
        });
        assert!(matches!(result, Err(BuildError::Watch(_))));
    }

    #[test]
    fn test_process_transpiler_missing_command() {
        let transpiler = ProcessTranspiler {
            command: "lunabuild-no-such-transpiler".to_string(),
        };
        let result = transpiler.emit(Path::new("tsconfig.json"), &mut |_| Ok(()));
        assert!(matches!(result, Err(BuildError::Io(_))));
    }
}
