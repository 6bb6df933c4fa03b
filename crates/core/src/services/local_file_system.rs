//! Local file system implementation
//!
//! Provides the filesystem queries of [`FileSystem`] through `std::fs`,
//! with recursive globbing done by `walkdir` and `globset`.

use crate::error::Result;
use crate::interfaces::FileSystem;
use globset::Glob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default implementation of FileSystem using std::fs
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_contents(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        let mut contents = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            contents.push(entry?.path());
        }
        contents.sort();
        Ok(contents)
    }

    fn glob(&self, directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        tracing::debug!("glob: directory={:?}, pattern={}", directory, pattern);

        let mut matches = Vec::new();
        for entry in WalkDir::new(directory).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(directory) else {
                continue;
            };
            if matcher.is_match(relative) {
                matches.push(entry.path().to_path_buf());
            }
        }

        tracing::debug!("glob matched {} paths", matches.len());
        matches.sort();
        Ok(matches)
    }
}
