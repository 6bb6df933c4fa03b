use std::io;
use std::path::PathBuf;

/// Errors that can occur during forge operations.
///
/// Linting findings are never reported through this type; linters return
/// [`LintingIssue`](crate::linting::LintingIssue) lists instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Directory walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid glob pattern: {0}")]
    GlobError(#[from] globset::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
}

/// Result type alias for forge operations
pub type Result<T> = std::result::Result<T, Error>;
