//! Rewriting role markup in documentation source.

use super::{Reference, RoleRegistry};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// How a resolved role is written back into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LinkStyle {
    /// reStructuredText anonymous hyperlink: `` `title <uri>`__ ``
    #[default]
    Rst,
    /// HTML anchor element.
    Html,
}

/// Result of [`expand_roles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    pub output: String,
    pub replaced: usize,
    /// Role names that appeared in the source but are not registered.
    pub unknown: BTreeSet<String>,
}

fn role_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r":([A-Za-z0-9_][A-Za-z0-9_.+-]*):`((?:[^`\\]|\\.)+)`")
            .expect("role pattern is valid")
    })
}

/// Replace every registered ``:name:`text` `` in `source` with a link.
///
/// Roles glued to a preceding word character are not role markup and are
/// left alone, as are roles whose name is not registered.
pub fn expand_roles(source: &str, registry: &RoleRegistry, style: LinkStyle) -> Expansion {
    let mut output = String::with_capacity(source.len());
    let mut replaced = 0;
    let mut unknown = BTreeSet::new();
    let mut last = 0;

    for cap in role_regex().captures_iter(source) {
        let whole = match cap.get(0) {
            Some(m) => m,
            None => continue,
        };
        let preceded_by_word = source[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == ':' || c == '`');
        if preceded_by_word {
            continue;
        }

        let name = &cap[1];
        let text = &cap[2];
        match registry.try_resolve(name, text) {
            Some(reference) => {
                output.push_str(&source[last..whole.start()]);
                output.push_str(&render(&reference, style));
                last = whole.end();
                replaced += 1;
            }
            None => {
                unknown.insert(name.to_string());
            }
        }
    }
    output.push_str(&source[last..]);

    Expansion {
        output,
        replaced,
        unknown,
    }
}

/// Render one reference in the requested style.
pub fn render(reference: &Reference, style: LinkStyle) -> String {
    match style {
        LinkStyle::Rst => format!(
            "`{} <{}>`__",
            escape_rst(&reference.title),
            escape_rst(&reference.refuri)
        ),
        LinkStyle::Html => format!(
            "<a class=\"reference external\" href=\"{}\">{}</a>",
            escape_html(&reference.refuri),
            escape_html(&reference.title)
        ),
    }
}

fn escape_rst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '`' | '<' | '>' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
