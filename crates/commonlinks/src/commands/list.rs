use super::CommandExecutor;
use crate::conf_file;
use crate::errors;
use crate::links::LinkTable;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A mapping together with the file it came from.
#[derive(Debug, Serialize)]
pub struct MappingListing {
    pub config: PathBuf,
    pub links: LinkTable,
}

impl CommandExecutor {
    /// Load the mapping from the docs config file.
    ///
    /// Fails if the file is missing or holds no `commonlinks` mapping.
    pub fn load_links(&self, config: Option<&Path>) -> Result<MappingListing> {
        let path = self.mapping_file(config);
        let links = conf_file::find_mapping(&path)
            .with_context(|| format!("Failed to read mapping from {}", path.display()))?
            .ok_or_else(|| errors::mapping_not_found(&path))?;

        Ok(MappingListing {
            config: path,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::DocsFixture;
    use super::*;
    use crate::errors::{ActionableError, CommonLinksError};

    #[test]
    fn test_load_links_from_default_conf_py() {
        let docs = DocsFixture::new();
        docs.write(
            "conf.py",
            "commonlinks = {\n    'AResponse': 'apidocs/veslo/AResponse.html',\n}\n",
        );

        let listing = docs.executor().load_links(None).unwrap();

        assert_eq!(listing.links.len(), 1);
        assert_eq!(
            listing.links.get("AResponse"),
            Some("apidocs/veslo/AResponse.html")
        );
        assert!(listing.config.ends_with("conf.py"));
    }

    #[test]
    fn test_config_without_mapping() {
        let docs = DocsFixture::new();
        docs.write("conf.py", "project = 'veslo'\n");

        let err = docs.executor().load_links(None).unwrap_err();
        assert!(err.downcast_ref::<ActionableError>().is_some());
        assert!(err.to_string().contains("No commonlinks mapping found"));
    }

    #[test]
    fn test_inline_empty_mapping_lists_nothing() {
        let docs = DocsFixture::new();
        docs.write("conf.py", "project = 'veslo'\ncommonlinks = {}\n");

        let listing = docs.executor().load_links(None).unwrap();
        assert!(listing.links.is_empty());
    }

    #[test]
    fn test_missing_config_file() {
        let docs = DocsFixture::new();

        let err = docs
            .executor()
            .load_links(Some(Path::new("missing.py")))
            .unwrap_err();
        let cause = err.downcast_ref::<CommonLinksError>().unwrap();
        assert!(matches!(cause, CommonLinksError::Io { .. }));
    }
}
