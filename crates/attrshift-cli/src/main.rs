//! attrshift command line
//!
//! Converts legacy `attrs` / `states` view attributes into inline
//! expression attributes.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{CommandContext, CommandError, ConvertOptions};
use config::CliConfig;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<ExitCode> {
    let loaded = CliConfig::load(cli.config.as_deref())
        .map_err(|e| CommandError::Config(e.to_string()))?;
    let config = loaded.config;

    // Initialize tracing
    init_tracing(cli, &config.log_level).map_err(|e| CommandError::Config(e.to_string()))?;
    if let Some(notice) = &loaded.fallback_notice {
        tracing::warn!("{}", notice);
    }
    tracing::debug!("Loaded configuration: {:?}", config);

    let ctx = CommandContext::new(cli, config.converter)?;

    match &cli.command {
        Commands::Convert {
            input,
            output,
            report,
            pretty,
            check_output,
        } => {
            let opts = ConvertOptions {
                input: input.clone(),
                output: output.clone(),
                report: report.clone(),
                pretty: *pretty,
                check_output: *check_output,
            };
            commands::convert(&ctx, &opts)
        }
        Commands::Validate { input } => commands::validate(&ctx, input),
        Commands::Condition { domain } => commands::condition(&ctx, domain),
        Commands::States { list } => commands::states(&ctx, list),
        Commands::Sample => commands::sample(&ctx),
    }
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins over `-v` / `-q`, which win over the configured level.
/// Logs go to stderr so stdout only carries command output.
fn init_tracing(cli: &Cli, configured: &str) -> anyhow::Result<()> {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        configured
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "attrshift={level},attrshift_sdk={level},attrshift_parser={level},attrshift_core={level}"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Sdk(_) => "CONVERSION_ERROR",
        CommandError::Parse(_) => "PARSE_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Parse(_) | CommandError::Input(_) | CommandError::Json(_) => {
            ExitCode::from(1)
        }
        CommandError::Sdk(attrshift_sdk::SdkError::IoError(_)) | CommandError::Io(_) => {
            ExitCode::from(3)
        }
        CommandError::Sdk(attrshift_sdk::SdkError::ConfigError(_)) | CommandError::Config(_) => {
            ExitCode::from(5)
        }
        CommandError::Sdk(_) => ExitCode::from(1),
    }
}
