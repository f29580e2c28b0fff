//! commonlinks
//!
//! Builds a table of API reference shortcut links from a Javadoc output tree,
//! writes it into the documentation config and resolves the resulting
//! inline roles.

use anyhow::Result;
use clap::Parser;
use commonlinks::cli::{Cli, Commands};
use commonlinks::commands::{CommandExecutor, ExpandRequest, GenerateRequest};
use commonlinks::config::CommonLinksConfig;
use commonlinks::errors::{ActionableError, CommonLinksError};
use commonlinks::output::{ExitCode, JsonError, JsonOutput, OutputContext};
use std::env;
use tracing_subscriber::EnvFilter;

/// Helper to determine exit code from an error chain
fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    if let Some(err) = error.downcast_ref::<CommonLinksError>() {
        return match err {
            CommonLinksError::Io { source, .. } => io_exit_code(source),
            CommonLinksError::Config(_)
            | CommonLinksError::TomlParse(_)
            | CommonLinksError::TomlEdit(_) => ExitCode::InvalidArgument,
            CommonLinksError::UnknownRole(_) => ExitCode::NotFound,
            CommonLinksError::UnknownRoles { .. } => ExitCode::ValidationFailed,
            CommonLinksError::TomlSerialize(_) => ExitCode::GenericError,
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return io_exit_code(io_error);
    }

    if error.downcast_ref::<ActionableError>().is_some() {
        return ExitCode::NotFound;
    }

    let error_msg = error.to_string().to_lowercase();
    if error_msg.contains("not found") {
        ExitCode::NotFound
    } else if error_msg.contains("invalid") {
        ExitCode::InvalidArgument
    } else {
        ExitCode::GenericError
    }
}

fn io_exit_code(error: &std::io::Error) -> ExitCode {
    match error.kind() {
        std::io::ErrorKind::NotFound => ExitCode::NotFound,
        _ => ExitCode::ExternalError,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("commonlinks={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Generate { json, .. }
        | Commands::List { json, .. }
        | Commands::Resolve { json, .. } => *json,
        Commands::Expand { .. } => false,
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::List { .. } => "list",
        Commands::Resolve { .. } => "resolve",
        Commands::Expand { .. } => "expand",
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let json = command_wants_json(&cli.command);
    let name = command_name(&cli.command);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            let code = error_to_exit_code(&e);
            tracing::debug!(exit = code.code(), "{}", code.description());
            if json {
                let error = JsonError::new(code, format!("{:#}", e), name);
                match error.to_json_string() {
                    Ok(text) => println!("{}", text),
                    Err(_) => eprintln!("Error: {:#}", e),
                }
            } else if let Some(actionable) = e.downcast_ref::<ActionableError>() {
                eprint!("Error: {}", actionable);
            } else {
                eprintln!("Error: {:#}", e);
            }
            code
        }
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let current_dir = env::current_dir()?;
    let config = match &cli.settings {
        Some(path) => CommonLinksConfig::load_file(path)?,
        None => CommonLinksConfig::load(&current_dir)?,
    };
    let executor = CommandExecutor::new(&current_dir, config);

    match cli.command {
        Commands::Generate {
            root,
            anchor,
            output,
            format,
            dry_run,
            json,
        } => {
            let ctx = OutputContext::new(cli.quiet, json);
            let summary = executor.generate(GenerateRequest {
                root,
                anchor,
                output,
                format,
                dry_run,
            })?;

            if ctx.is_json() {
                ctx.print_json(&JsonOutput::success(&summary, "generate"))?;
            } else if summary.dry_run {
                ctx.print_raw(&summary.rendered)?;
            } else {
                ctx.print_info(format!(
                    "Wrote {} link(s) to {} ({} file(s) scanned, {} excluded)",
                    summary.entries,
                    summary.output.display(),
                    summary.files_seen,
                    summary.excluded
                ))?;
            }
            if !summary.collisions.is_empty() {
                ctx.print_warning(format!(
                    "{} symbol name collision(s); the later page won each time",
                    summary.collisions.len()
                ))?;
            }
            if !summary.unanchored.is_empty() {
                ctx.print_warning(format!(
                    "{} path(s) did not contain the anchor and were used unchanged",
                    summary.unanchored.len()
                ))?;
            }
        }

        Commands::List { config, json } => {
            let ctx = OutputContext::new(cli.quiet, json);
            let listing = executor.load_links(config.as_deref())?;

            if ctx.is_json() {
                ctx.print_json(&JsonOutput::success(&listing, "list"))?;
            } else {
                for (symbol, target) in listing.links.iter() {
                    ctx.print_data(format!("{} -> {}", symbol, target))?;
                }
                ctx.print_info(format!(
                    "{} link(s) in {}",
                    listing.links.len(),
                    listing.config.display()
                ))?;
            }
        }

        Commands::Resolve {
            role,
            text,
            config,
            json,
        } => {
            let ctx = OutputContext::new(cli.quiet, json);
            let reference = executor.resolve_role(config.as_deref(), &role, &text)?;

            if ctx.is_json() {
                ctx.print_json(&JsonOutput::success(&reference, "resolve"))?;
            } else {
                ctx.print_data(format!("{} -> {}", reference.title, reference.refuri))?;
            }
        }

        Commands::Expand {
            file,
            config,
            style,
            output,
            strict,
        } => {
            let ctx = OutputContext::new(cli.quiet, false);
            let to_stdout = output.is_none();
            let expansion = executor.expand(ExpandRequest {
                file,
                config,
                style,
                output,
                strict,
            })?;

            if to_stdout {
                ctx.print_raw(&expansion.output)?;
            } else {
                ctx.print_info(format!("Expanded {} role(s)", expansion.replaced))?;
            }
            if !expansion.unknown.is_empty() {
                let names: Vec<&str> = expansion.unknown.iter().map(String::as_str).collect();
                ctx.print_warning(format!("Unregistered roles left as-is: {}", names.join(", ")))?;
            }
        }
    }

    Ok(ExitCode::Success)
}
