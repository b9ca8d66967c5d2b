// fieldstrip/src/commands/scan.rs
//! The `scan` command: report removable fields without writing anything.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fieldstrip_core::{StripEngine, StripSummaryItem, content_digest, total_occurrences};

use crate::ui::output_format::{self, ColorMode};
use crate::ui::summary;
use crate::utils::file_io;

/// How the scan report is emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportTarget {
    /// Human-readable tables on stderr.
    #[default]
    Tables,
    JsonStdout,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub files: Vec<PathBuf>,
    pub fail_over_threshold: Option<usize>,
    pub target: ReportTarget,
    pub quiet: bool,
}

/// Scan results for a single file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub input_sha256: String,
    pub output_sha256: String,
    pub total: usize,
    pub fields: Vec<StripSummaryItem>,
}

/// The complete scan report, as exported to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub engine: String,
    pub files: Vec<FileReport>,
    pub total: usize,
}

impl ScanReport {
    pub fn exceeds(&self, threshold: Option<usize>) -> bool {
        threshold.is_some_and(|limit| self.total > limit)
    }
}

/// Scans every file and builds the report. Nothing is written.
pub fn build_report(engine: &dyn StripEngine, files: &[PathBuf]) -> Result<ScanReport> {
    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        reports.push(scan_file(engine, path)?);
    }
    let total = reports.iter().map(|r| r.total).sum();
    Ok(ScanReport {
        engine: engine.name().to_string(),
        files: reports,
        total,
    })
}

fn scan_file(engine: &dyn StripEngine, path: &Path) -> Result<FileReport> {
    let source_id = path.display().to_string();
    let original = file_io::read_text(path)?;
    let (stripped, fields) = engine
        .strip(&original, &source_id)
        .with_context(|| format!("Failed to scan {}", source_id))?;
    let total = total_occurrences(&fields);
    info!("{}: {} removable field occurrence(s).", source_id, total);
    Ok(FileReport {
        path: source_id,
        input_sha256: content_digest(&original),
        output_sha256: content_digest(&stripped),
        total,
        fields,
    })
}

/// Runs `scan` and returns `true` when the threshold was exceeded.
pub fn run_scan(engine: &dyn StripEngine, opts: &ScanOptions, colors: ColorMode) -> Result<bool> {
    info!("Starting scan with the {} engine.", engine.name());
    let report = build_report(engine, &opts.files)?;

    match &opts.target {
        ReportTarget::JsonStdout => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        ReportTarget::JsonFile(path) => {
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write scan report to {}", path.display()))?;
            if !opts.quiet {
                output_format::print_info_message(
                    &mut io::stderr(),
                    &format!("Scan report written to {}", path.display()),
                    colors.stderr,
                )?;
            }
        }
        ReportTarget::Tables => {
            if !opts.quiet {
                let mut err = io::stderr();
                for file in &report.files {
                    summary::print_summary(&file.path, &file.fields, &mut err, colors.stderr)?;
                }
            }
        }
    }

    let exceeded = report.exceeds(opts.fail_over_threshold);
    if exceeded {
        let limit = opts.fail_over_threshold.unwrap_or_default();
        warn!("Removal count {} exceeds threshold {}.", report.total, limit);
        output_format::print_warn_message(
            &mut io::stderr(),
            &format!(
                "{} removable field(s) found, exceeding the threshold of {}.",
                report.total, limit
            ),
            colors.stderr,
        )?;
    }
    Ok(exceeded)
}
