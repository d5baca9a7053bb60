//! lunabuild - build and watch tool for transpiled Lua mods
//!
//! lunabuild sits between an external source-to-Lua transpiler and the module
//! loader of a scoped game host. It rewrites emitted module references into
//! host-loadable paths, repairs load-time captures of the lazily-initialized
//! host API surface, mirrors assets into the output tree from filesystem
//! change events, and merges per-scope type declarations into one artifact.

pub mod banner;
pub mod config;
pub mod declarations;
pub mod error;
pub mod manifest;
pub mod mirror;
pub mod pipeline;
pub mod reimport;
pub mod resolver;
pub mod scope;
pub mod transpiler;
pub mod watcher;

// Re-exports for convenience
pub use banner::Templates;
pub use config::Config;
pub use error::{BuildError, BuildResult};
pub use manifest::Manifest;
pub use pipeline::{run_build, BuildRun};
pub use resolver::ScopeViolation;
pub use scope::Scope;
pub use transpiler::{EmitUnit, ProcessTranspiler, Transpiler};
pub use watcher::{watch, WatchEvent, WatchKind, WatchNotice, WatchOptions};
