//! Object-file discovery.
//!
//! Walks a directory tree and collects every file whose basename matches
//! [`OBJECT_FILE_PATTERN`]. Symbolic links to directories are not followed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;
use thiserror::Error;
use walkdir::WalkDir;

/// Basename pattern identifying object files.
pub const OBJECT_FILE_PATTERN: &str = "*.o";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to read directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid file pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl DiscoveryError {
    fn walk(root: &Path, err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
        Self::Io { path, source: io::Error::from(err) }
    }
}

/// Find all object files (`*.o`) under `root`, including files directly inside it.
pub fn find_object_files(root: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    find_files_matching(root, OBJECT_FILE_PATTERN)
}

/// Find all files under `root` whose basename matches the glob `pattern`.
///
/// Entries of one directory are visited in name order, depth first. Any unreadable
/// directory aborts the walk.
pub fn find_files_matching(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let compiled = Pattern::new(pattern)
        .map_err(|source| DiscoveryError::Pattern { pattern: pattern.to_string(), source })?;

    let metadata = fs::metadata(root)
        .map_err(|source| DiscoveryError::Io { path: root.to_path_buf(), source })?;
    if !metadata.is_dir() {
        return Err(DiscoveryError::Io {
            path: root.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|err| DiscoveryError::walk(root, err))?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        // Links to directories are neither descended into nor reported.
        if file_type.is_symlink() && entry.path().is_dir() {
            continue;
        }
        if compiled.matches(&entry.file_name().to_string_lossy()) {
            found.push(entry.into_path());
        }
    }

    log::debug!("found {} file(s) matching '{}' under {}", found.len(), pattern, root.display());
    Ok(found)
}
