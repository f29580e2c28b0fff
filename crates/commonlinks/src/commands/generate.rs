use super::CommandExecutor;
use crate::conf_file::{self, ConfFormat};
use crate::errors;
use crate::scan::{self, Collision};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Command-line overrides for `generate`; `None` falls back to the config.
#[derive(Debug, Default)]
pub struct GenerateRequest {
    pub root: Option<PathBuf>,
    pub anchor: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<ConfFormat>,
    pub dry_run: bool,
}

/// What `generate` did.
#[derive(Debug, Serialize)]
pub struct GenerateSummary {
    pub root: PathBuf,
    pub output: PathBuf,
    pub format: ConfFormat,
    pub dry_run: bool,
    pub entries: usize,
    pub files_seen: usize,
    pub excluded: usize,
    pub unanchored: Vec<String>,
    pub collisions: Vec<Collision>,
    /// The block that was (or, with `dry_run`, would have been) written.
    pub rendered: String,
}

impl CommandExecutor {
    /// Scan the API reference and write the mapping into the docs config.
    pub fn generate(&self, request: GenerateRequest) -> Result<GenerateSummary> {
        let mut options = self.config.scan_options();
        if let Some(root) = request.root {
            options.root = root;
        }
        if let Some(anchor) = request.anchor {
            options.anchor = anchor;
        }
        options.root = self.resolve_path(&options.root);

        if !options.root.is_dir() {
            return Err(errors::apidocs_root_not_found(&options.root).into());
        }

        let output_config = self.config.output();
        let output = self.resolve_path(&request.output.unwrap_or_else(|| output_config.path()));
        let format = request
            .format
            .or(output_config.format)
            .unwrap_or_else(|| ConfFormat::from_path(&output));

        let report = scan::scan(&options)
            .with_context(|| format!("Failed to scan {}", options.root.display()))?;
        let rendered = conf_file::render(&report.table, format)?;

        if request.dry_run {
            info!(entries = report.table.len(), "dry run, nothing written");
        } else {
            conf_file::append_mapping(&output, &report.table, format)
                .with_context(|| format!("Failed to write mapping to {}", output.display()))?;
            info!(
                entries = report.table.len(),
                output = %output.display(),
                format = format.as_str(),
                "mapping written"
            );
        }

        Ok(GenerateSummary {
            root: options.root,
            output,
            format,
            dry_run: request.dry_run,
            entries: report.table.len(),
            files_seen: report.files_seen,
            excluded: report.excluded,
            unanchored: report.unanchored,
            collisions: report.collisions,
            rendered,
        })
    }
}
