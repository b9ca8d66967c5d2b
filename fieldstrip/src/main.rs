// fieldstrip/src/main.rs
//! fieldstrip entry point.
//!
//! Parses the command line, resolves the rule set, builds the selected
//! engine and dispatches to the command implementation.

use anyhow::Result;
use clap::Parser;
use log::debug;
use std::io;
use std::process::ExitCode;

use fieldstrip::cli::{Cli, Commands};
use fieldstrip::commands::scan::{ReportTarget, ScanOptions};
use fieldstrip::commands::strip::StripOptions;
use fieldstrip::commands::{self, fields, scan, strip};
use fieldstrip::logger;
use fieldstrip::ui::output_format::{self, ColorMode};
use fieldstrip_core::build_engine;

fn run(cli: Cli, colors: ColorMode) -> Result<ExitCode> {
    match cli.command {
        Commands::Strip(cmd) => {
            let config = commands::load_active_rules(&cmd.rules)?;
            let engine = build_engine(config, cmd.engine.into())?;
            let opts = StripOptions {
                files: cmd.files,
                output: cmd.output,
                dry_run: cmd.dry_run,
                diff: cmd.diff,
                backup: cmd.backup,
                no_summary: cmd.no_summary,
                quiet: cli.quiet,
            };
            strip::run_strip(engine.as_ref(), &opts, colors)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Scan(cmd) => {
            let config = commands::load_active_rules(&cmd.rules)?;
            let engine = build_engine(config, cmd.engine.into())?;
            let target = match (cmd.json_stdout, cmd.json_file) {
                (true, _) => ReportTarget::JsonStdout,
                (false, Some(path)) => ReportTarget::JsonFile(path),
                (false, None) => ReportTarget::Tables,
            };
            let opts = ScanOptions {
                files: cmd.files,
                fail_over_threshold: cmd.fail_over_threshold,
                target,
                quiet: cli.quiet,
            };
            if scan::run_scan(engine.as_ref(), &opts, colors)? {
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Fields(cmd) => {
            let config = commands::load_rules(&cmd.rules)?;
            fields::run_fields(&config, &mut io::stdout().lock(), colors.stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug, cli.disable_debug));
    let colors = ColorMode::detect(cli.no_color);
    debug!("Parsed command line: {:?}", cli);

    match run(cli, colors) {
        Ok(code) => code,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            let _ = output_format::print_error_message(&mut io::stderr(), &format!("{:#}", e), colors.stderr);
            ExitCode::FAILURE
        }
    }
}
