//! Error types and actionable error formatting.
//!
//! Library code returns [`CommonLinksError`]. The command layer wraps the
//! common failures in an [`ActionableError`] so the user sees what probably
//! went wrong and how to fix it.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the scanning, configuration and role modules.
#[derive(Debug, Error)]
pub enum CommonLinksError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to edit TOML document: {0}")]
    TomlEdit(#[from] toml_edit::TomlError),

    #[error("Role not found: '{0}'")]
    UnknownRole(String),

    #[error("Unknown roles in {}: {}", .file.display(), .roles.join(", "))]
    UnknownRoles { file: PathBuf, roles: Vec<String> },
}

impl CommonLinksError {
    /// Wrap an I/O error together with the path that caused it.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CommonLinksError>;

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use commonlinks::errors::ActionableError;
///
/// let error = ActionableError::new("Role 'Foo' not found")
///     .with_cause("The mapping was generated before Foo.html existed")
///     .with_remedy("Regenerate the mapping: commonlinks generate");
///
/// assert!(error.to_error_message().contains("To fix:"));
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    error: String,
    causes: Vec<String>,
    remediation: Vec<String>,
}

impl ActionableError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// Format the message with its causes and remedies for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("{}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// The API reference root handed to `generate` does not exist.
pub fn apidocs_root_not_found(root: &Path) -> ActionableError {
    ActionableError::new(format!("API docs root not found: {}", root.display()))
        .with_cause("The Javadoc output has not been generated yet")
        .with_cause("The command is running from a different directory than the docs")
        .with_remedy("Generate the API reference first (e.g. mvn javadoc:aggregate)")
        .with_remedy("Point at the right directory: commonlinks generate --root <dir>")
        .with_remedy("Set [scan] root in commonlinks.toml")
}

/// The config file holds no `commonlinks` mapping.
pub fn mapping_not_found(config: &Path) -> ActionableError {
    ActionableError::new(format!(
        "No commonlinks mapping found in {}",
        config.display()
    ))
    .with_cause("The generator has not been run against this config file")
    .with_cause("The mapping was written to a different file")
    .with_remedy(format!(
        "Append a mapping: commonlinks generate --output {}",
        config.display()
    ))
}

/// A token refers to a role that was never registered.
pub fn role_not_found(role: &str, config: &Path) -> ActionableError {
    ActionableError::new(format!("Role not found: '{}'", role))
        .with_cause("No API page derives the symbol name from its file name")
        .with_cause("The mapping is older than the API reference")
        .with_remedy(format!(
            "List the registered roles: commonlinks list --config {}",
            config.display()
        ))
        .with_remedy("Regenerate the mapping: commonlinks generate")
}
