//! File system interface
//!
//! Abstracts the few filesystem queries the inspector needs, so the
//! workspace lookup can run against an in-memory fake.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Trait for filesystem queries
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Direct children of a directory, sorted by path
    fn list_contents(&self, directory: &Path) -> Result<Vec<PathBuf>>;

    /// Paths under `directory` whose path relative to it matches `pattern`,
    /// sorted by path
    fn glob(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>>;
}
