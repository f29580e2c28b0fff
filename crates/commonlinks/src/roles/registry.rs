//! In-process role host.

use super::{setup_link_roles, Reference, RoleHandler, RoleHost};
use crate::errors::{CommonLinksError, Result};
use crate::links::LinkTable;
use std::collections::BTreeMap;
use tracing::debug;

/// Named role handlers, looked up by role name.
///
/// Registering a name twice replaces the earlier handler.
///
/// # Example
///
/// ```
/// use commonlinks::roles::RoleRegistry;
/// use commonlinks::LinkTable;
///
/// let mut table = LinkTable::new();
/// table.insert("Foo", "apidocs/x/Foo.html");
///
/// let registry = RoleRegistry::from_table(&table);
/// let link = registry.resolve("Foo", "_").unwrap();
/// assert_eq!(link.title, "Foo");
/// assert_eq!(link.refuri, "apidocs/x/Foo.html");
/// ```
#[derive(Default)]
pub struct RoleRegistry {
    roles: BTreeMap<String, Box<dyn RoleHandler>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with one link role per table entry.
    pub fn from_table(table: &LinkTable) -> Self {
        let mut registry = Self::new();
        setup_link_roles(&mut registry, table);
        registry
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Registered role names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    /// Resolve ``:name:`text` `` if `name` is registered.
    pub fn try_resolve(&self, name: &str, text: &str) -> Option<Reference> {
        self.roles.get(name).map(|h| h.resolve(name, text))
    }

    /// Resolve ``:name:`text` ``, failing on an unknown role.
    pub fn resolve(&self, name: &str, text: &str) -> Result<Reference> {
        self.try_resolve(name, text)
            .ok_or_else(|| CommonLinksError::UnknownRole(name.to_string()))
    }
}

impl RoleHost for RoleRegistry {
    fn add_role(&mut self, name: &str, handler: Box<dyn RoleHandler>) {
        if self.roles.insert(name.to_string(), handler).is_some() {
            debug!(role = name, "replaced existing role");
        }
    }
}
