//! API reference shortcut links for documentation builds.
//!
//! Two halves share one mapping:
//!
//! - [`scan`] crawls a Javadoc output tree and derives a short symbol name
//!   for every class page; [`conf_file`] writes the result into the
//!   documentation config.
//! - [`roles`] reads the mapping back and registers one inline role per
//!   symbol, so ``:AResponse:`_` `` becomes a link to the class page.

pub mod cli;
pub mod commands;
pub mod conf_file;
pub mod config;
pub mod errors;
pub mod links;
pub mod output;
pub mod roles;
pub mod scan;

pub use commands::CommandExecutor;
pub use conf_file::ConfFormat;
pub use config::CommonLinksConfig;
pub use errors::{ActionableError, CommonLinksError};
pub use links::LinkTable;
pub use output::{ExitCode, JsonOutput};
pub use roles::{Reference, RoleHandler, RoleHost, RoleRegistry};
