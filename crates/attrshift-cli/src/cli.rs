//! CLI argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default file name for `--output` given without a value
pub const DEFAULT_OUTPUT: &str = "converted_xml.xml";
/// Default file name for `--report` given without a value
pub const DEFAULT_REPORT: &str = "conversion_report.json";

/// attrshift - convert legacy attrs/states view attributes to inline expressions
#[derive(Parser, Debug)]
#[command(name = "attrshift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: ./attrshift.{toml,yaml,json} if present)
    #[arg(long, global = true, env = "ATTRSHIFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert every legacy attribute of a view file
    Convert {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Write the converted view to a file instead of stdout
        #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_OUTPUT)]
        output: Option<PathBuf>,

        /// Write a conversion report (.json, or .yaml/.yml)
        #[arg(short, long, num_args = 0..=1, default_missing_value = DEFAULT_REPORT)]
        report: Option<PathBuf>,

        /// Put each tag on its own indented line
        #[arg(long)]
        pretty: bool,

        /// Validate the converted view as well
        #[arg(long)]
        check_output: bool,
    },

    /// Check a view file for structural problems
    Validate {
        /// Input file, or `-` for stdin
        input: PathBuf,
    },

    /// Convert a single legacy domain, e.g. "[('state', '=', 'draft')]"
    Condition {
        /// Domain list
        domain: String,
    },

    /// Convert a comma separated state list into an invisible attribute
    States {
        /// State names, e.g. "draft,sent"
        list: String,
    },

    /// Print a sample view using every legacy form
    Sample,
}
