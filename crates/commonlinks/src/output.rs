//! Structured output formatting for CLI commands.
//!
//! Human-readable output goes through [`OutputContext`], which honours
//! `--quiet` and `--json`. Machine-readable output is wrapped in
//! [`JsonOutput`] / [`JsonError`] envelopes.

use chrono::Utc;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print text verbatim, without adding a newline (suppressed by --json)
    pub fn print_raw(&self, text: &str) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        match io::stdout().write_all(text.as_bytes()) {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
            other => other,
        }
    }

    /// Print informational message (suppressed by --quiet or --json)
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print warning (suppressed by --quiet or --json)
    pub fn print_warning(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe_stderr(&format!("Warning: {}", msg))
        } else {
            Ok(())
        }
    }

    /// Print a JSON document (only in --json mode)
    pub fn print_json<T: Serialize>(&self, output: &JsonOutput<T>) -> io::Result<()> {
        if self.json {
            let text = output
                .to_json_string()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln_safe(&text)
        } else {
            Ok(())
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Piping into `head` and friends closes stdout early.
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

fn writeln_safe_stderr(msg: &str) -> io::Result<()> {
    match writeln!(io::stderr(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
        Err(e) => Err(e),
    }
}

/// Envelope metadata shared by success and error output.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub version: &'static str,
    pub timestamp: String,
    pub command: String,
}

impl Metadata {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            version: OUTPUT_VERSION,
            timestamp: Utc::now().to_rfc3339(),
            command: command.into(),
        }
    }
}

/// Wrapper for successful command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata::new(command),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Numeric exit code the process terminates with
    pub code: i32,
    pub message: String,
}

impl JsonError {
    pub fn new(code: ExitCode, message: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.code(),
                message: message.into(),
            },
            metadata: Metadata::new(command),
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Standardized exit codes for the commonlinks CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded (0)
    Success = 0,

    /// Generic error (1)
    GenericError = 1,

    /// Invalid arguments or configuration (2)
    InvalidArgument = 2,

    /// Resource not found - API docs root, config file, role (3)
    NotFound = 3,

    /// Validation failed - unknown roles under --strict (4)
    ValidationFailed = 4,

    /// File system failure (10)
    ExternalError = 10,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Command succeeded",
            ExitCode::GenericError => "Generic error occurred",
            ExitCode::InvalidArgument => "Invalid arguments or configuration",
            ExitCode::NotFound => "Resource not found (API docs root, config file, role)",
            ExitCode::ValidationFailed => "Validation failed (unknown roles with --strict)",
            ExitCode::ExternalError => "File system operation failed",
        }
    }
}
