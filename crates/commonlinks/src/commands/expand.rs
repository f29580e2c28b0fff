use super::CommandExecutor;
use crate::errors::CommonLinksError;
use crate::roles::{expand_roles, Expansion, LinkStyle};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for `expand`.
#[derive(Debug)]
pub struct ExpandRequest {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
    pub style: LinkStyle,
    /// Write here instead of returning the text only.
    pub output: Option<PathBuf>,
    pub strict: bool,
}

impl CommandExecutor {
    /// Rewrite registered roles in a source file into links.
    pub fn expand(&self, request: ExpandRequest) -> Result<Expansion> {
        let registry = self.load_registry(request.config.as_deref())?;
        let source_path = self.resolve_path(&request.file);
        let source = fs::read_to_string(&source_path)
            .with_context(|| format!("Failed to read {}", source_path.display()))?;

        let expansion = expand_roles(&source, &registry, request.style);
        for name in &expansion.unknown {
            warn!(role = %name, file = %source_path.display(), "unknown role left as-is");
        }
        if request.strict && !expansion.unknown.is_empty() {
            return Err(CommonLinksError::UnknownRoles {
                file: request.file,
                roles: expansion.unknown.into_iter().collect(),
            }
            .into());
        }

        if let Some(output) = &request.output {
            let output = self.resolve_path(output);
            fs::write(&output, &expansion.output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(replaced = expansion.replaced, output = %output.display(), "expanded roles");
        }

        Ok(expansion)
    }
}
