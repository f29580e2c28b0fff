use super::CommandExecutor;
use crate::conf_file;
use crate::errors;
use crate::roles::{self, Reference, RoleRegistry};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

impl CommandExecutor {
    /// Load the mapping and build a role registry from it.
    ///
    /// A config without a mapping gives an empty registry.
    pub fn load_registry(&self, config: Option<&Path>) -> Result<RoleRegistry> {
        let path = self.mapping_file(config);
        let links = conf_file::load_mapping(&path)
            .with_context(|| format!("Failed to read mapping from {}", path.display()))?;
        let mut registry = RoleRegistry::new();
        let metadata = roles::setup(&mut registry, &links);
        debug!(
            roles = registry.len(),
            version = metadata.version,
            parallel_read_safe = metadata.parallel_read_safe,
            "link roles registered"
        );
        Ok(registry)
    }

    /// Resolve ``:role:`text` `` against the mapping in `config`.
    pub fn resolve_role(&self, config: Option<&Path>, role: &str, text: &str) -> Result<Reference> {
        let registry = self.load_registry(config)?;
        match registry.try_resolve(role, text) {
            Some(reference) => Ok(reference),
            None => {
                let path = self.mapping_file(config);
                Err(errors::role_not_found(role, &path).into())
            }
        }
    }
}
