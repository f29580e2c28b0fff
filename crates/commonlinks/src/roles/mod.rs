//! Inline markup roles built from the link table.
//!
//! The documentation host owns role registration; [`RoleHost`] is the seam
//! it exposes. [`setup_link_roles`] registers one [`LinkRole`] per mapping
//! entry, keyed by the symbol name. [`RoleRegistry`] is an in-process host
//! used by the CLI and by [`expand_roles`].

mod expand;
mod registry;

pub use expand::{expand_roles, Expansion, LinkStyle};
pub use registry::RoleRegistry;

use crate::links::LinkTable;
use serde::Serialize;
use tracing::debug;

/// Role text meaning "display the role name".
pub const NAME_SENTINEL: &str = "_";
/// Role text meaning "display the link target".
pub const URL_SENTINEL: &str = "_url_";

/// A hyperlink produced by a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub title: String,
    pub refuri: String,
    pub internal: bool,
}

/// Handler invoked for ``:role_name:`text` ``.
pub trait RoleHandler {
    fn resolve(&self, role_name: &str, text: &str) -> Reference;
}

/// The registration side of a documentation host.
pub trait RoleHost {
    fn add_role(&mut self, name: &str, handler: Box<dyn RoleHandler>);
}

/// Links every use of the role to a fixed target.
///
/// ```
/// use commonlinks::roles::{LinkRole, RoleHandler};
///
/// let role = LinkRole::new("apidocs/x/Foo.html");
/// assert_eq!(role.resolve("Foo", "_").title, "Foo");
/// assert_eq!(role.resolve("Foo", "_url_").title, "apidocs/x/Foo.html");
/// assert_eq!(role.resolve("Foo", "the Foo class").title, "the Foo class");
/// ```
#[derive(Debug, Clone)]
pub struct LinkRole {
    target: String,
}

impl LinkRole {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl RoleHandler for LinkRole {
    fn resolve(&self, role_name: &str, text: &str) -> Reference {
        let text = unescape(text);
        let title = match text.as_str() {
            NAME_SENTINEL => role_name.to_string(),
            URL_SENTINEL => self.target.clone(),
            _ => text,
        };
        Reference {
            title,
            refuri: self.target.clone(),
            internal: false,
        }
    }
}

/// Strip markup escapes from role text.
///
/// A backslash escapes the following character; an escaped whitespace
/// character is removed entirely.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(ws) if ws.is_whitespace() => {}
            Some(escaped) => out.push(escaped),
            None => {}
        }
    }
    out
}

/// What the extension reports to its host after setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionMetadata {
    pub version: &'static str,
    pub parallel_read_safe: bool,
}

/// Register a [`LinkRole`] for every entry of `table`.
pub fn setup_link_roles<H: RoleHost + ?Sized>(host: &mut H, table: &LinkTable) {
    for (name, target) in table.iter() {
        debug!(role = name, uri = target, "registering link role");
        host.add_role(name, Box::new(LinkRole::new(target)));
    }
}

/// Extension entry point: register all roles and report metadata.
pub fn setup<H: RoleHost + ?Sized>(host: &mut H, table: &LinkTable) -> ExtensionMetadata {
    setup_link_roles(host, table);
    ExtensionMetadata {
        version: env!("CARGO_PKG_VERSION"),
        parallel_read_safe: true,
    }
}
