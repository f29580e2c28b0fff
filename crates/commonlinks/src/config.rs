//! Configuration file loading and parsing.
//!
//! Settings live in an optional `commonlinks.toml` next to the documentation
//! sources. If no config file exists, the defaults reproduce the stock
//! behaviour: scan `apidocs/veslo`, cut paths at `apidocs`, append a Python
//! block to `conf.py`.

use crate::conf_file::ConfFormat;
use crate::errors::{CommonLinksError, Result};
use crate::scan::{ScanOptions, DEFAULT_ANCHOR, DEFAULT_EXCLUDE_MARKERS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the tool's own config file.
pub const CONFIG_FILE_NAME: &str = "commonlinks.toml";

/// Default API reference root to scan.
pub const DEFAULT_ROOT: &str = "apidocs/veslo";

/// Default documentation config file receiving the mapping.
pub const DEFAULT_OUTPUT: &str = "conf.py";

/// Root configuration structure loaded from `commonlinks.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonLinksConfig {
    /// Directory scanning settings (optional).
    pub scan: Option<ScanConfig>,
    /// Where and how the mapping is written (optional).
    pub output: Option<OutputConfig>,
}

/// Directory scanning settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// API reference root (default: "apidocs/veslo").
    pub root: Option<PathBuf>,
    /// Segment link targets start from (default: "apidocs").
    pub anchor: Option<String>,
    /// Path substrings that mark pages to skip (default: the four listing markers).
    pub exclude: Option<Vec<String>>,
}

impl ScanConfig {
    pub fn root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }

    pub fn anchor(&self) -> String {
        self.anchor
            .clone()
            .unwrap_or_else(|| DEFAULT_ANCHOR.to_string())
    }

    pub fn exclude(&self) -> Vec<String> {
        self.exclude.clone().unwrap_or_else(|| {
            DEFAULT_EXCLUDE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect()
        })
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Config file receiving the mapping (default: "conf.py").
    pub path: Option<PathBuf>,
    /// "python" or "toml" (default: inferred from the path's extension).
    pub format: Option<ConfFormat>,
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn format(&self) -> ConfFormat {
        self.format
            .unwrap_or_else(|| ConfFormat::from_path(&self.path()))
    }
}

impl CommonLinksConfig {
    /// Load `commonlinks.toml` from `dir` if it exists.
    ///
    /// Returns the default config if the file doesn't exist and an error if
    /// it exists but is malformed.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load a specific config file, falling back to defaults when it is absent.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CommonLinksError::io(path, e))?;
        toml::from_str(&content).map_err(|e| {
            CommonLinksError::Config(format!("{}: {}", path.display(), e.message()))
        })
    }

    pub fn scan(&self) -> ScanConfig {
        self.scan.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    /// Scan options from this config, before any command-line overrides.
    pub fn scan_options(&self) -> ScanOptions {
        let scan = self.scan();
        ScanOptions {
            root: scan.root(),
            anchor: scan.anchor(),
            exclude: scan.exclude(),
        }
    }
}
