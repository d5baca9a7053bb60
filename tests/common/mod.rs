//! Common test utilities for lunabuild integration tests.

use std::path::Path;

use lunabuild::error::BuildResult;
use lunabuild::manifest::Manifest;
use lunabuild::transpiler::{EmitSink, EmitUnit, Transpiler};

/// In-memory transpiler replaying a fixed emission set and declaration bundle
pub struct FixedTranspiler {
    pub units: Vec<EmitUnit>,
    pub declarations: String,
}

impl FixedTranspiler {
    pub fn new(units: Vec<EmitUnit>) -> Self {
        Self {
            units,
            declarations: String::new(),
        }
    }
}

impl Transpiler for FixedTranspiler {
    fn emit(&self, _project: &Path, sink: &mut EmitSink) -> BuildResult<()> {
        for unit in &self.units {
            sink(unit.clone())?;
        }
        Ok(())
    }

    fn emit_declarations(&self, _project: &Path) -> BuildResult<String> {
        Ok(self.declarations.clone())
    }
}

pub fn unit(path: &str, content: &str) -> EmitUnit {
    EmitUnit {
        path: path.into(),
        content: content.to_string(),
        is_declaration: path.ends_with(".d.ts"),
    }
}

pub fn test_manifest() -> Manifest {
    Manifest {
        id: "race".to_string(),
        name: "Sandbox Race".to_string(),
        poster: "ada".to_string(),
        description: "Checkpoint racing".to_string(),
        dependencies: vec!["base-lib".to_string()],
    }
}
