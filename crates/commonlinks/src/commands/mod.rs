//! Command implementations behind the CLI.
//!
//! Each subcommand is a method on [`CommandExecutor`], split across files by
//! command. Methods return data; printing is left to the binary.

mod expand;
mod generate;
mod list;
mod resolve;

pub use expand::ExpandRequest;
pub use generate::{GenerateRequest, GenerateSummary};
pub use list::MappingListing;

use crate::config::CommonLinksConfig;
use std::path::{Path, PathBuf};

/// Runs commands relative to a base directory with a loaded config.
pub struct CommandExecutor {
    base_dir: PathBuf,
    config: CommonLinksConfig,
}

impl CommandExecutor {
    pub fn new(base_dir: impl Into<PathBuf>, config: CommonLinksConfig) -> Self {
        Self {
            base_dir: base_dir.into(),
            config,
        }
    }

    /// Resolve `path` against the base directory unless it is absolute.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// The documentation config file to read the mapping from.
    fn mapping_file(&self, config: Option<&Path>) -> PathBuf {
        match config {
            Some(path) => self.resolve_path(path),
            None => self.resolve_path(&self.config.output().path()),
        }
    }
}
