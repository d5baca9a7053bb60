//! Host loader scopes
//!
//! The host partitions mod code into three mutually-isolated scopes plus a
//! catch-all for files outside the scope trees. A module's scope is decided by
//! the top-level output directory it falls under, never by its contents.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The three scope directory names, in the order prefixes are matched
pub const SCOPE_DIRS: [&str; 3] = ["client", "server", "shared"];

/// Code partition recognized by the host loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Runs only on connected clients
    Client,
    /// Runs only on the authoritative server
    Server,
    /// Loadable from either side
    Shared,
    /// Outside the three scope trees
    #[default]
    None,
}

impl Scope {
    /// Map a path segment to a scope, if it names a scope directory
    pub fn from_segment(segment: &str) -> Option<Scope> {
        match segment {
            "client" => Some(Scope::Client),
            "server" => Some(Scope::Server),
            "shared" => Some(Scope::Shared),
            _ => None,
        }
    }

    /// Classify a path relative to the output root by its first component
    pub fn of_path(relative: &Path) -> Scope {
        relative
            .components()
            .next()
            .and_then(|c| c.as_os_str().to_str())
            .and_then(Scope::from_segment)
            .unwrap_or(Scope::None)
    }

    /// Directory name for the scope, if it has one
    pub fn dir(&self) -> Option<&'static str> {
        match self {
            Scope::Client => Some("client"),
            Scope::Server => Some("server"),
            Scope::Shared => Some("shared"),
            Scope::None => None,
        }
    }

    /// Client and server are mutually exclusive at host load time
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Scope::Client | Scope::Server)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir().unwrap_or("none"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_scope_of_path_top_level_dir() {
        assert_eq!(Scope::of_path(&PathBuf::from("client/init.lua")), Scope::Client);
        assert_eq!(Scope::of_path(&PathBuf::from("server/net/rpc.lua")), Scope::Server);
        assert_eq!(Scope::of_path(&PathBuf::from("shared/util.lua")), Scope::Shared);
    }

    #[test]
    fn test_scope_of_path_unscoped() {
        assert_eq!(Scope::of_path(&PathBuf::from("init.lua")), Scope::None);
        assert_eq!(Scope::of_path(&PathBuf::from("vendor/lib.lua")), Scope::None);
    }

    #[test]
    fn test_scope_from_segment_rejects_unknown() {
        assert_eq!(Scope::from_segment("clients"), None);
        assert_eq!(Scope::from_segment(""), None);
    }

    #[test]
    fn test_scope_exclusive() {
        assert!(Scope::Client.is_exclusive());
        assert!(Scope::Server.is_exclusive());
        assert!(!Scope::Shared.is_exclusive());
        assert!(!Scope::None.is_exclusive());
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Client.to_string(), "client");
        assert_eq!(Scope::None.to_string(), "none");
    }
}
