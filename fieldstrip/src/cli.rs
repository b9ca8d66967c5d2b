// fieldstrip/src/cli.rs
//! This file defines the command-line interface (CLI) for the fieldstrip
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand, ValueEnum};
use fieldstrip_core::HeadlessEngineType;
use std::path::PathBuf;

/// The data file processed when no path is given.
pub const DEFAULT_TARGET_FILE: &str = "sample_data_complete.js";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "fieldstrip",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip named fields from JavaScript and JSON data files",
    long_about = "fieldstrip removes configured keys, with their values and separating commas, from the object literals in a JavaScript or JSON data file and rewrites the file in place. By default it removes isSpicy, hasScallions, hasCilantro, hasGarlic and cookingTime from sample_data_complete.js.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress confirmation messages, summaries and logging.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the fieldstrip crates)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Explicitly disable debug logging, even if RUST_LOG is set to DEBUG
    #[arg(long = "disable-debug", global = true, help = "Disable debug logging, overriding RUST_LOG.")]
    pub disable_debug: bool,

    /// Never emit ANSI colors
    #[arg(long = "no-color", global = true, help = "Disable colored output.")]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `fieldstrip` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Removes the configured fields and rewrites the file.
    #[command(about = "Remove the configured fields from one or more files, rewriting them in place.")]
    Strip(StripCommand),

    /// Reports what would be removed without writing anything.
    #[command(about = "Report which fields would be removed, without modifying any file.")]
    Scan(ScanCommand),

    /// Lists the active field rules.
    #[command(about = "List the active field rules.")]
    Fields(FieldsCommand),
}

/// Rule selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Path to a YAML rule file merged over the base rules.
    #[arg(long = "config", value_name = "FILE", help = "Path to a YAML rule file merged over the base rules.")]
    pub config: Option<PathBuf>,

    /// Ad-hoc fields replacing the default rule set.
    #[arg(long = "field", value_name = "NAME[:KIND]", help = "Remove this field instead of the defaults (repeatable). KIND is boolean, integer, number, string or any.")]
    pub fields: Vec<String>,

    /// Enable these rule names, including opt-in rules (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these rule names, including opt-in rules (comma-separated).")]
    pub enable: Vec<String>,

    /// Disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Also match unquoted keys.
    #[arg(long = "bare-keys", help = "Also remove matching unquoted keys (name: value). Structured engine only.")]
    pub bare_keys: bool,
}

/// Arguments for the `strip` command.
#[derive(Parser, Debug)]
pub struct StripCommand {
    /// Files to rewrite.
    #[arg(value_name = "FILE", env = "FIELDSTRIP_FILE", default_value = DEFAULT_TARGET_FILE, help = "Files to rewrite in place.")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Select which stripping engine to use.
    #[arg(long = "engine", value_name = "ENGINE", value_enum, default_value_t = EngineChoice::Structured, help = "Select the stripping engine.")]
    pub engine: EngineChoice,

    /// Write the result to this file instead of overwriting the input.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the result to this file instead of overwriting the input (single input only).")]
    pub output: Option<PathBuf>,

    /// Compute the result without writing it.
    #[arg(long = "dry-run", help = "Compute the result without writing it.")]
    pub dry_run: bool,

    /// Show a unified diff of the change.
    #[arg(long, short = 'D', help = "Print a unified diff of the change to stdout.")]
    pub diff: bool,

    /// Keep a copy of the original next to it.
    #[arg(long, help = "Keep the original content in <FILE>.bak before overwriting.")]
    pub backup: bool,

    /// Suppress the removal summary.
    #[arg(long = "no-summary", help = "Suppress the removal summary.")]
    pub no_summary: bool,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Files to scan.
    #[arg(value_name = "FILE", env = "FIELDSTRIP_FILE", default_value = DEFAULT_TARGET_FILE, help = "Files to scan.")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Select which stripping engine to use.
    #[arg(long = "engine", value_name = "ENGINE", value_enum, default_value_t = EngineChoice::Structured, help = "Select the stripping engine.")]
    pub engine: EngineChoice,

    /// Exit with a non-zero code if the total number of removals exceeds this threshold.
    #[arg(long = "fail-over-threshold", value_name = "N", help = "Exit with code 1 if the total number of removable fields exceeds N.")]
    pub fail_over_threshold: Option<usize>,

    /// Export the scan report to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Write the scan report to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Print the scan report as JSON to stdout.
    #[arg(long = "json-stdout", conflicts_with = "json_file", help = "Print the scan report as JSON to stdout.")]
    pub json_stdout: bool,
}

/// Arguments for the `fields` command.
#[derive(Parser, Debug)]
pub struct FieldsCommand {
    #[command(flatten)]
    pub rules: RuleArgs,
}

/// Enum for selecting the stripping engine.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum EngineChoice {
    /// Object-literal aware removal with correct comma handling.
    Structured,
    /// Sequential regular expression substitution, quoted keys only.
    Regex,
}

impl From<EngineChoice> for HeadlessEngineType {
    fn from(choice: EngineChoice) -> Self {
        match choice {
            EngineChoice::Structured => HeadlessEngineType::Structured,
            EngineChoice::Regex => HeadlessEngineType::Regex,
        }
    }
}
