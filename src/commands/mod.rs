//! Command implementations for the CLI surface

mod build;
mod declarations;
mod watch;

pub use build::cmd_build;
pub use declarations::cmd_declarations;
pub use watch::cmd_watch;

/// Fixed diagnostic prefix for one-shot builds
pub const TAG_BUILD: &str = "[build]";
/// Fixed diagnostic prefix for watch mode
pub const TAG_WATCH: &str = "[watch]";
