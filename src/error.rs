//! Error types for lunabuild
//!
//! Uses `thiserror` for library errors; the binary layer wraps these in
//! `anyhow` for display.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lunabuild operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for lunabuild operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// Required field absent from the project manifest
    #[error("missing required manifest field '{field}' in {file}")]
    MissingManifestField { field: String, file: PathBuf },

    /// Manifest file does not exist
    #[error("manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest line could not be parsed as `key = value`
    #[error("invalid manifest line {line} in {file}: {message}")]
    InvalidManifest {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Config file exists but is not valid TOML
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Source or scope directory missing
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// External transpiler exited non-zero
    #[error("transpiler '{command}' failed: {message}")]
    TranspilerFailed { command: String, message: String },

    /// Filesystem watch layer error
    #[error("watch error: {0}")]
    Watch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_missing_manifest_field() {
        let err = BuildError::MissingManifestField {
            field: "poster".to_string(),
            file: PathBuf::from("manifest.cfg"),
        };
        assert_eq!(
            err.to_string(),
            "missing required manifest field 'poster' in manifest.cfg"
        );
    }

    #[test]
    fn test_error_display_transpiler_failed() {
        let err = BuildError::TranspilerFailed {
            command: "tstl".to_string(),
            message: "TS2304: Cannot find name 'foo'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transpiler 'tstl' failed: TS2304: Cannot find name 'foo'"
        );
    }

    #[test]
    fn test_error_display_invalid_manifest() {
        let err = BuildError::InvalidManifest {
            file: PathBuf::from("manifest.cfg"),
            line: 3,
            message: "expected 'key = value'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid manifest line 3 in manifest.cfg: expected 'key = value'"
        );
    }
}
