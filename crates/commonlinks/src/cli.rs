//! Command-line interface definitions using clap.

use crate::conf_file::ConfFormat;
use crate::roles::LinkStyle;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// API reference shortcut links for documentation builds
///
/// Scans a Javadoc output tree, maps each class page to a short role name
/// and writes the mapping into the documentation config. The same mapping
/// resolves `:Name:`text`` roles into hyperlinks.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - Generic error occurred
///   2  - Invalid arguments or configuration
///   3  - Resource not found (API docs root, config file, role)
///   4  - Validation failed (unknown roles with --strict)
///  10  - File system operation failed
#[derive(Parser)]
#[command(name = "commonlinks")]
#[command(about = "API reference shortcut links for documentation builds", long_about = None)]
pub struct Cli {
    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Tool config file (default: ./commonlinks.toml if present)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the API reference and append the mapping to the config file
    Generate {
        /// API reference root to scan [default: apidocs/veslo]
        #[arg(long)]
        root: Option<PathBuf>,

        /// Path segment link targets start from [default: apidocs]
        #[arg(long)]
        anchor: Option<String>,

        /// Config file receiving the mapping [default: conf.py]
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Mapping format (default: inferred from the output extension)
        #[arg(long, value_enum)]
        format: Option<ConfFormat>,

        /// Print the rendered mapping instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the mapping stored in a config file
    List {
        /// Config file holding the mapping [default: conf.py]
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single role token into a link
    ///
    /// TEXT may be `_` (display the role name), `_url_` (display the
    /// target) or any literal display text.
    Resolve {
        /// Role name, e.g. AResponse
        role: String,

        /// Role text
        text: String,

        /// Config file holding the mapping [default: conf.py]
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output JSON format
        #[arg(long)]
        json: bool,
    },

    /// Rewrite registered roles in a documentation source file into links
    Expand {
        /// Source file (reStructuredText)
        file: PathBuf,

        /// Config file holding the mapping [default: conf.py]
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Link syntax to emit
        #[arg(long, value_enum, default_value_t = LinkStyle::Rst)]
        style: LinkStyle,

        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Fail if the source uses roles that are not registered
        #[arg(long)]
        strict: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults_are_unset() {
        let cli = Cli::try_parse_from(["commonlinks", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                root,
                anchor,
                output,
                format,
                dry_run,
                json,
            } => {
                assert!(root.is_none());
                assert!(anchor.is_none());
                assert!(output.is_none());
                assert!(format.is_none());
                assert!(!dry_run);
                assert!(!json);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["commonlinks", "-vv", "list"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_expand_style_value() {
        let cli =
            Cli::try_parse_from(["commonlinks", "expand", "index.rst", "--style", "html"]).unwrap();
        match cli.command {
            Commands::Expand { style, strict, .. } => {
                assert_eq!(style, LinkStyle::Html);
                assert!(!strict);
            }
            _ => panic!("expected expand"),
        }
    }
}
