//! Writing the mapping into a documentation config file and reading it back.
//!
//! Two formats are supported:
//!
//! - **Python** (`conf.py`): a `commonlinks = {...}` dict literal is appended
//!   to the end of the file. When a file holds several blocks, the last one
//!   is the one in effect.
//! - **TOML**: the `[commonlinks]` table is inserted or replaced in place,
//!   leaving the rest of the document untouched.

use crate::errors::{CommonLinksError, Result};
use crate::links::LinkTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

/// Name of the config value holding the mapping.
pub const MAPPING_KEY: &str = "commonlinks";

/// Config file flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfFormat {
    Python,
    Toml,
}

impl ConfFormat {
    /// Infer the format from a file extension; anything but `.toml` is Python.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfFormat::Toml,
            _ => ConfFormat::Python,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfFormat::Python => "python",
            ConfFormat::Toml => "toml",
        }
    }
}

/// Render the mapping as a Python dict assignment.
///
/// ```
/// use commonlinks::conf_file::render_python;
/// use commonlinks::LinkTable;
///
/// let mut table = LinkTable::new();
/// table.insert("Foo", "apidocs/x/Foo.html");
/// assert_eq!(
///     render_python(&table),
///     "commonlinks = {\n    'Foo': 'apidocs/x/Foo.html',\n}\n"
/// );
/// ```
pub fn render_python(table: &LinkTable) -> String {
    let mut body = format!("{} = {{\n", MAPPING_KEY);
    for (symbol, target) in table.iter() {
        body.push_str(&format!(
            "    '{}': '{}',\n",
            escape_py(symbol),
            escape_py(target)
        ));
    }
    body.push_str("}\n");
    body
}

#[derive(Serialize, Deserialize)]
struct MappingDocument {
    #[serde(default)]
    commonlinks: Option<LinkTable>,
}

/// Render the mapping as a standalone `[commonlinks]` TOML table.
pub fn render_toml(table: &LinkTable) -> Result<String> {
    let doc = MappingDocument {
        commonlinks: Some(table.clone()),
    };
    Ok(toml::to_string(&doc)?)
}

/// Render in the given format.
pub fn render(table: &LinkTable, format: ConfFormat) -> Result<String> {
    match format {
        ConfFormat::Python => Ok(render_python(table)),
        ConfFormat::Toml => render_toml(table),
    }
}

/// Write the mapping into `path`, creating the file if needed.
pub fn append_mapping(path: &Path, table: &LinkTable, format: ConfFormat) -> Result<()> {
    match format {
        ConfFormat::Python => append_python(path, table),
        ConfFormat::Toml => upsert_toml(path, table),
    }
}

fn append_python(path: &Path, table: &LinkTable) -> Result<()> {
    let needs_newline = match fs::read(path) {
        Ok(existing) => existing.last().is_some_and(|b| *b != b'\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(CommonLinksError::io(path, e)),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CommonLinksError::io(path, e))?;

    let mut block = String::new();
    if needs_newline {
        block.push('\n');
    }
    block.push_str(&render_python(table));
    file.write_all(block.as_bytes())
        .map_err(|e| CommonLinksError::io(path, e))
}

fn upsert_toml(path: &Path, table: &LinkTable) -> Result<()> {
    let mut doc = match fs::read_to_string(path) {
        Ok(content) => content.parse::<toml_edit::DocumentMut>()?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml_edit::DocumentMut::new(),
        Err(e) => return Err(CommonLinksError::io(path, e)),
    };

    let mut section = toml_edit::Table::new();
    for (symbol, target) in table.iter() {
        section[symbol] = toml_edit::value(target);
    }
    doc[MAPPING_KEY] = toml_edit::Item::Table(section);

    fs::write(path, doc.to_string()).map_err(|e| CommonLinksError::io(path, e))
}

/// Parse the last `commonlinks = {...}` block in a Python config.
///
/// Returns `None` when the file has no such block.
pub fn parse_python_mapping(content: &str) -> Option<LinkTable> {
    let block = block_regex()
        .captures_iter(content)
        .last()?
        .get(1)?
        .as_str();

    let table = entry_regex()
        .captures_iter(block)
        .filter_map(|cap| {
            let key = cap.get(1).or_else(|| cap.get(2))?.as_str();
            let value = cap.get(3).or_else(|| cap.get(4))?.as_str();
            Some((unescape_py(key), unescape_py(value)))
        })
        .collect();
    Some(table)
}

/// Parse the `[commonlinks]` table of a TOML config.
pub fn parse_toml_mapping(content: &str) -> Result<Option<LinkTable>> {
    let doc: MappingDocument = toml::from_str(content)?;
    Ok(doc.commonlinks)
}

/// Read the mapping from a config file, choosing the parser by extension.
///
/// `None` means the file holds no mapping at all.
pub fn find_mapping(path: &Path) -> Result<Option<LinkTable>> {
    let content = fs::read_to_string(path).map_err(|e| CommonLinksError::io(path, e))?;
    match ConfFormat::from_path(path) {
        ConfFormat::Python => Ok(parse_python_mapping(&content)),
        ConfFormat::Toml => parse_toml_mapping(&content),
    }
}

/// Like [`find_mapping`], but a file without a mapping yields an empty table.
pub fn load_mapping(path: &Path) -> Result<LinkTable> {
    Ok(find_mapping(path)?.unwrap_or_default())
}

fn block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^commonlinks[ \t]*=[ \t]*\{([^{}]*)\}")
            .expect("block pattern is valid")
    })
}

fn entry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let quoted = r#"(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#;
        let value = r#"(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)")"#;
        Regex::new(&format!(r"{}\s*:\s*{}", quoted, value)).expect("entry pattern is valid")
    })
}

fn escape_py(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

fn unescape_py(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(e @ ('\\' | '\'' | '"')) => out.push(e),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
