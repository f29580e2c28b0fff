//! The symbol → target mapping shared by the generator and the role registrar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from short symbol names to anchor-relative link targets.
///
/// Inserting an existing symbol replaces its target (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkTable {
    entries: BTreeMap<String, String>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the target it replaced.
    pub fn insert(&mut self, symbol: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.entries.insert(symbol.into(), target.into())
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LinkTable {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
