// fieldstrip/src/commands/strip.rs
//! The `strip` command: remove fields and rewrite files.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fieldstrip_core::{StripEngine, StripSummaryItem, total_occurrences};

use crate::ui::output_format::{self, ColorMode};
use crate::ui::{diff_viewer, summary};
use crate::utils::file_io;

/// Options for a `strip` run, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct StripOptions {
    pub files: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub diff: bool,
    pub backup: bool,
    pub no_summary: bool,
    pub quiet: bool,
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub written_to: Option<PathBuf>,
    pub removed: usize,
}

/// The confirmation line printed after a file is written.
pub fn confirmation_message(fields: &[&str], path: &Path) -> String {
    format!("Removed fields {} from {}", fields.join(", "), path.display())
}

/// Runs `strip` over every input file, stopping at the first failure.
pub fn run_strip(
    engine: &dyn StripEngine,
    opts: &StripOptions,
    colors: ColorMode,
) -> Result<Vec<FileOutcome>> {
    info!("Starting strip operation with the {} engine.", engine.name());

    if opts.output.is_some() && opts.files.len() > 1 {
        bail!("--output can only be used with a single input file.");
    }
    if opts.output.is_some() && opts.backup {
        bail!("--backup cannot be combined with --output; the input file is left unmodified.");
    }

    let mut outcomes = Vec::with_capacity(opts.files.len());
    for path in &opts.files {
        outcomes.push(strip_file(engine, path, opts, colors)?);
    }

    info!("Strip operation completed for {} file(s).", outcomes.len());
    Ok(outcomes)
}

fn strip_file(
    engine: &dyn StripEngine,
    path: &Path,
    opts: &StripOptions,
    colors: ColorMode,
) -> Result<FileOutcome> {
    let source_id = path.display().to_string();
    let original = file_io::read_text(path)?;

    let (stripped, summary) = engine
        .strip(&original, &source_id)
        .with_context(|| format!("Failed to strip fields from {}", source_id))?;
    let removed = total_occurrences(&summary);
    debug!(
        "Stripped {}: {} removal(s), length {} -> {}.",
        source_id,
        removed,
        original.len(),
        stripped.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.diff {
        diff_viewer::print_diff(&original, &stripped, &source_id, &mut out, colors.stdout)?;
    }

    let written_to = if opts.dry_run {
        if !opts.quiet {
            output_format::print_info_message(
                &mut out,
                &format!("Would remove {} field(s) from {}", removed, source_id),
                colors.stdout,
            )?;
        }
        None
    } else {
        let target = opts.output.clone().unwrap_or_else(|| path.to_path_buf());
        write_result(path, &target, &original, &stripped, opts.backup)?;
        if !opts.quiet {
            let fields = engine.get_rules().field_names();
            output_format::print_success_message(
                &mut out,
                &confirmation_message(&fields, &target),
                colors.stdout,
            )?;
        }
        Some(target)
    };
    out.flush()?;

    report_summary(&source_id, &summary, opts, colors)?;

    Ok(FileOutcome {
        path: path.to_path_buf(),
        written_to,
        removed,
    })
}

fn write_result(
    input: &Path,
    target: &Path,
    original: &str,
    stripped: &str,
    backup: bool,
) -> Result<()> {
    let in_place = target == input;
    if backup {
        file_io::write_backup(input, original)?;
    }
    if in_place && original == stripped {
        info!("{} is already clean; leaving it untouched.", input.display());
        return Ok(());
    }
    info!("Writing stripped content to {}.", target.display());
    file_io::write_atomic(target, stripped)
}

fn report_summary(
    source_id: &str,
    items: &[StripSummaryItem],
    opts: &StripOptions,
    colors: ColorMode,
) -> Result<()> {
    if opts.no_summary || opts.quiet {
        return Ok(());
    }
    let mut err = io::stderr();
    summary::print_summary(source_id, items, &mut err, colors.stderr)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldstrip_core::{HeadlessEngineType, StripConfig, build_engine};
    use std::fs;
    use tempfile::tempdir;

    fn engine(kind: HeadlessEngineType) -> Box<dyn StripEngine> {
        build_engine(StripConfig::load_default_rules().unwrap(), kind).unwrap()
    }

    fn quiet_opts(files: Vec<PathBuf>) -> StripOptions {
        StripOptions {
            files,
            quiet: true,
            ..StripOptions::default()
        }
    }

    #[test]
    fn confirmation_lists_fields_in_order() {
        let msg = confirmation_message(&["isSpicy", "cookingTime"], Path::new("d.js"));
        assert_eq!(msg, "Removed fields isSpicy, cookingTime from d.js");
    }

    #[test]
    fn rewrites_file_in_place() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("d.js");
        fs::write(&path, r#"[{"name": "A", "isSpicy": true, "cookingTime": 3}]"#)?;

        let outcomes = run_strip(
            engine(HeadlessEngineType::Structured).as_ref(),
            &quiet_opts(vec![path.clone()]),
            ColorMode::plain(),
        )?;

        assert_eq!(fs::read_to_string(&path)?, r#"[{"name": "A"}]"#);
        assert_eq!(outcomes[0].removed, 2);
        assert_eq!(outcomes[0].written_to.as_deref(), Some(path.as_path()));
        Ok(())
    }

    #[test]
    fn dry_run_leaves_file_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("d.js");
        let original = r#"[{"name": "A", "hasGarlic": false}]"#;
        fs::write(&path, original)?;

        let opts = StripOptions {
            dry_run: true,
            ..quiet_opts(vec![path.clone()])
        };
        let outcomes = run_strip(engine(HeadlessEngineType::Regex).as_ref(), &opts, ColorMode::plain())?;

        assert_eq!(fs::read_to_string(&path)?, original);
        assert_eq!(outcomes[0].removed, 1);
        assert_eq!(outcomes[0].written_to, None);
        Ok(())
    }

    #[test]
    fn backup_keeps_original() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("d.js");
        let original = r#"{"a": 1, "isSpicy": false}"#;
        fs::write(&path, original)?;

        let opts = StripOptions {
            backup: true,
            ..quiet_opts(vec![path.clone()])
        };
        run_strip(engine(HeadlessEngineType::Structured).as_ref(), &opts, ColorMode::plain())?;

        assert_eq!(fs::read_to_string(file_io::backup_path(&path))?, original);
        assert_eq!(fs::read_to_string(&path)?, r#"{"a": 1}"#);
        Ok(())
    }

    #[test]
    fn output_rejects_multiple_inputs() {
        let opts = StripOptions {
            output: Some(PathBuf::from("out.js")),
            ..quiet_opts(vec![PathBuf::from("a.js"), PathBuf::from("b.js")])
        };
        let err = run_strip(engine(HeadlessEngineType::Structured).as_ref(), &opts, ColorMode::plain())
            .unwrap_err();
        assert!(err.to_string().contains("single input file"));
    }

    #[test]
    fn output_rejects_backup() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("d.js");
        let original = r#"{"a": 1, "isSpicy": false}"#;
        fs::write(&path, original)?;
        let out = dir.path().join("clean.js");

        let opts = StripOptions {
            output: Some(out.clone()),
            backup: true,
            ..quiet_opts(vec![path.clone()])
        };
        let err = run_strip(engine(HeadlessEngineType::Structured).as_ref(), &opts, ColorMode::plain())
            .unwrap_err();

        assert!(err.to_string().contains("--backup cannot be combined with --output"));
        assert!(!out.exists());
        assert!(!file_io::backup_path(&path).exists());
        assert_eq!(fs::read_to_string(&path)?, original);
        Ok(())
    }

    #[test]
    fn output_outcome_names_written_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("d.js");
        fs::write(&path, r#"{"a": 1, "isSpicy": false}"#)?;
        let out = dir.path().join("clean.js");

        let opts = StripOptions {
            output: Some(out.clone()),
            ..quiet_opts(vec![path.clone()])
        };
        let outcomes = run_strip(engine(HeadlessEngineType::Structured).as_ref(), &opts, ColorMode::plain())?;

        assert_eq!(outcomes[0].written_to.as_deref(), Some(out.as_path()));
        assert_eq!(fs::read_to_string(&out)?, r#"{"a": 1}"#);
        Ok(())
    }

    #[test]
    fn parse_failure_keeps_original() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.js");
        let original = "[{\"isSpicy\": true, \"name\": \"unterminated}]";
        fs::write(&path, original)?;

        let result = run_strip(
            engine(HeadlessEngineType::Structured).as_ref(),
            &quiet_opts(vec![path.clone()]),
            ColorMode::plain(),
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path)?, original);
        Ok(())
    }
}
