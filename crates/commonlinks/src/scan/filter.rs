//! Exclusion of Javadoc listing pages.

use std::path::{Path, PathBuf};

/// Substrings that mark class-usage and package listing pages.
pub const DEFAULT_EXCLUDE_MARKERS: [&str; 4] =
    ["class-use", "package-summary", "package-tree", "package-use"];

/// Returns true if `path` contains any of `markers` anywhere in its text.
pub fn is_excluded<S: AsRef<str>>(path: &Path, markers: &[S]) -> bool {
    let text = path.to_string_lossy();
    markers.iter().any(|m| text.contains(m.as_ref()))
}

/// Keep the paths that are not listing pages, preserving order.
pub fn filter_files<S: AsRef<str>>(paths: Vec<PathBuf>, markers: &[S]) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|p| !is_excluded(p, markers))
        .collect()
}
