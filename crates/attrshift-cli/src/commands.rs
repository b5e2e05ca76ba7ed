//! Command implementations for the attrshift CLI.

use crate::cli::Cli;
use attrshift_parser::{states_condition, ConditionParser, ParseError};
use attrshift_sdk::{
    format_markup, ConverterConfig, DocumentConverter, SdkError, ValidationError, SAMPLE_VIEW,
};
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Conversion error.
    #[error("{0}")]
    Sdk(#[from] SdkError),

    /// Legacy expression could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Input rejected before conversion.
    #[error("invalid input: {0}")]
    Input(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Machine-readable output
    pub json: bool,
    /// Suppress informational output
    pub quiet: bool,
    converter: DocumentConverter,
}

impl CommandContext {
    pub fn new(cli: &Cli, config: ConverterConfig) -> Result<Self> {
        let converter = DocumentConverter::builder()
            .with_config(config)
            .build()
            .map_err(|e| CommandError::Config(e.to_string()))?;

        Ok(Self {
            json: cli.json,
            quiet: cli.quiet,
            converter,
        })
    }

    /// Read an input file, or stdin for `-`
    fn read_input(&self, input: &Path) -> Result<String> {
        if input.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            return Ok(text);
        }
        Ok(self.converter.load(input)?)
    }
}

/// Options of the `convert` command
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub pretty: bool,
    pub check_output: bool,
}

/// Convert a whole view file.
pub fn convert(ctx: &CommandContext, opts: &ConvertOptions) -> Result<ExitCode> {
    let text = ctx.read_input(&opts.input)?;
    let outcome = ctx.converter.convert(&text);

    let converted = if opts.pretty {
        format_markup(&outcome.output)
    } else {
        outcome.output.clone()
    };

    let output_errors: Vec<ValidationError> = if opts.check_output {
        ctx.converter.validate(&converted)
    } else {
        Vec::new()
    };

    if let Some(path) = &opts.output {
        std::fs::write(path, &converted)?;
        tracing::info!("Converted view written to {}", path.display());
    }

    if let Some(path) = &opts.report {
        outcome.report().write_to(path)?;
    }

    let stats = outcome.statistics();
    if ctx.json {
        let mut body = json!({
            "statistics": stats,
            "conversions": outcome.conversions,
            "validationErrors": outcome.validation_errors,
            "skipped": outcome.skipped,
            "outputErrors": output_errors,
        });
        if opts.output.is_none() {
            body["output"] = json!(converted);
        }
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        if opts.output.is_none() {
            print!("{}", converted);
        }
        if !ctx.quiet {
            eprintln!(
                "Converted {} attributes ({} attrs, {} states), {} skipped",
                stats.total,
                stats.attrs,
                stats.states,
                outcome.skipped.len()
            );
            for skipped in &outcome.skipped {
                eprintln!("  skipped {}: {}", skipped.fragment, skipped.reason);
            }
        }
        for error in &output_errors {
            eprintln!("Output: {}", error);
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Check a view file; exits with status 1 when problems are found.
pub fn validate(ctx: &CommandContext, input: &Path) -> Result<ExitCode> {
    let text = ctx.read_input(input)?;
    let errors = ctx.converter.validate(&text);

    if ctx.json {
        let body = json!({ "valid": errors.is_empty(), "errors": errors });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else if errors.is_empty() {
        if !ctx.quiet {
            println!("{}: valid", input.display());
        }
    } else {
        for error in &errors {
            println!("{}: {}", input.display(), error);
        }
    }

    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Convert one domain list.
///
/// Unlike the document pass, an unparsable domain is an error here.
pub fn condition(ctx: &CommandContext, domain: &str) -> Result<ExitCode> {
    let node = ConditionParser::parse(domain)?;
    let expression = node.render();

    if ctx.json {
        let body = json!({
            "input": domain.trim(),
            "output": expression,
            "comparisons": node.comparison_count(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", expression);
    }
    Ok(ExitCode::SUCCESS)
}

/// Convert a `states` list into an `invisible` attribute.
pub fn states(ctx: &CommandContext, list: &str) -> Result<ExitCode> {
    let node = states_condition(list)
        .ok_or_else(|| CommandError::Input(format!("no state names in {:?}", list)))?;
    let expression = node.render();

    if ctx.json {
        let body = json!({ "input": list, "output": { "invisible": expression } });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("invisible=\"{}\"", expression);
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the built-in sample view.
pub fn sample(ctx: &CommandContext) -> Result<ExitCode> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&json!({ "sample": SAMPLE_VIEW }))?);
    } else {
        print!("{}", SAMPLE_VIEW);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn context(args: &[&str]) -> CommandContext {
        let cli = Cli::try_parse_from(args).unwrap();
        CommandContext::new(&cli, ConverterConfig::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let cli = Cli::try_parse_from(["attrshift", "sample"]).unwrap();
        let config = ConverterConfig {
            attribute_keys: Vec::new(),
            ..ConverterConfig::default()
        };
        assert!(matches!(
            CommandContext::new(&cli, config),
            Err(CommandError::Config(_))
        ));
    }

    #[test]
    fn test_condition_parse_error() {
        let ctx = context(&["attrshift", "condition", "x"]);
        assert!(matches!(
            condition(&ctx, "[('state','!=')]"),
            Err(CommandError::Parse(ParseError::MalformedTriple(_)))
        ));
    }

    #[test]
    fn test_states_without_names() {
        let ctx = context(&["attrshift", "states", "x"]);
        assert!(matches!(states(&ctx, " , "), Err(CommandError::Input(_))));
    }

    #[test]
    fn test_convert_writes_output_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("view.xml");
        let output = dir.path().join("converted.xml");
        let report = dir.path().join("report.json");
        std::fs::write(&input, r#"<button name="a" states="draft"/>"#).unwrap();

        let ctx = context(&["attrshift", "-q", "sample"]);
        let opts = ConvertOptions {
            input,
            output: Some(output.clone()),
            report: Some(report.clone()),
            pretty: false,
            check_output: true,
        };
        convert(&ctx, &opts).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            r#"<button name="a" invisible="state not in ('draft')"/>"#
        );
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(report["statistics"]["states"], 1);
    }

    #[test]
    fn test_missing_input_file() {
        let ctx = context(&["attrshift", "sample"]);
        let result = validate(&ctx, Path::new("/nonexistent/view.xml"));
        assert!(matches!(result, Err(CommandError::Sdk(SdkError::IoError(_)))));
    }
}
