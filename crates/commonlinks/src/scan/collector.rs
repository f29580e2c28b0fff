//! Recursive file listing.

use crate::errors::{CommonLinksError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List every file under `root`, descending into subdirectories.
///
/// Returned paths are absolute. A relative `root` is joined to the current
/// directory as-is (no canonicalisation). Symlinks are followed.
/// Entries are visited in file-name order so repeated runs produce the
/// same sequence.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let root = absolute(root)?;
    let mut files = Vec::new();

    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(&root, e))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    debug!(root = %root.display(), count = files.len(), "collected files");
    Ok(files)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| CommonLinksError::io(path, e))?;
    Ok(cwd.join(path))
}

fn walk_error(root: &Path, err: walkdir::Error) -> CommonLinksError {
    let path = err.path().unwrap_or(root).to_path_buf();
    // Symlink loops carry no io::Error.
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message));
    CommonLinksError::io(path, source)
}
