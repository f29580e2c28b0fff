//! API reference scanning.
//!
//! Turns a Javadoc output tree into a [`LinkTable`]:
//!
//! 1. [`collect_files`] lists every file under the root.
//! 2. [`filter_files`] drops class-use and package listing pages.
//! 3. [`normalize_path`] cuts each path down to start at the anchor segment.
//! 4. [`symbol_name`] derives the short role name from the file name.

mod collector;
mod filter;
mod normalize;
mod symbol;

pub use collector::collect_files;
pub use filter::{filter_files, is_excluded, DEFAULT_EXCLUDE_MARKERS};
pub use normalize::{normalize_path, path_to_slash, relative_to_anchor, DEFAULT_ANCHOR};
pub use symbol::symbol_name;

use crate::errors::Result;
use crate::links::LinkTable;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Inputs for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub anchor: String,
    pub exclude: Vec<String>,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            anchor: DEFAULT_ANCHOR.to_string(),
            exclude: DEFAULT_EXCLUDE_MARKERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A symbol whose target was replaced by a later page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub symbol: String,
    pub replaced: String,
    pub target: String,
}

/// Outcome of a scan: the table plus what was skipped along the way.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub table: LinkTable,
    pub files_seen: usize,
    pub excluded: usize,
    /// Paths that did not contain the anchor and were kept verbatim.
    pub unanchored: Vec<String>,
    pub collisions: Vec<Collision>,
}

/// Run the full collect → filter → normalize → derive pipeline.
pub fn scan(options: &ScanOptions) -> Result<ScanReport> {
    let files = collect_files(&options.root)?;
    let files_seen = files.len();
    let kept = filter_files(files, &options.exclude);
    let excluded = files_seen - kept.len();

    let mut report = ScanReport {
        table: LinkTable::new(),
        files_seen,
        excluded,
        unanchored: Vec::new(),
        collisions: Vec::new(),
    };

    for path in &kept {
        let target = normalize_path(path, &options.anchor);
        // Only an unanchored fallback can fail to start with the anchor.
        if !target.starts_with(options.anchor.as_str()) {
            warn!(path = %target, anchor = %options.anchor, "anchor not found, using path unchanged");
            report.unanchored.push(target.clone());
        }
        let symbol = symbol_name(&target).to_string();
        debug!(%symbol, uri = %target, "mapped");
        if let Some(replaced) = report.table.insert(symbol.clone(), target.clone()) {
            warn!(%symbol, %replaced, uri = %target, "symbol collision, keeping later target");
            report.collisions.push(Collision {
                symbol,
                replaced,
                target,
            });
        }
    }

    Ok(report)
}
