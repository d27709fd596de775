use crate::render::{self, RenderConfig};
use anyhow::{Result, bail};
use glob::MatchOptions;
use perfbase_core::{AssemblerOptions, ReportAssembler, ReportModel};
use serde::Serialize;
use std::path::PathBuf;

/// Extensions picked up when a directory is given
const CAPTURE_EXTENSIONS: &[&str] = &["har", "json"];

/// Reports built from a batch of capture files
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub reports: Vec<ReportModel>,
    pub failures: Vec<FileFailure>,
}

/// A capture file that could not be parsed
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub file: PathBuf,
    pub error: String,
}

/// Expand the given paths into capture files.
///
/// Files are taken as given. Directories are scanned (not recursively) for
/// `*.har` and `*.json`, matched case-insensitively and sorted by name.
pub fn collect_capture_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        tracing::debug!("Scanning directory: {}", path.display());
        let mut found = Vec::new();
        let escaped = glob::Pattern::escape(&path.to_string_lossy());
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::new()
        };

        for ext in CAPTURE_EXTENSIONS {
            let pattern = format!("{}/*.{}", escaped, ext);
            for entry in glob::glob_with(&pattern, options)? {
                let file = entry?;
                if file.is_file() {
                    found.push(file);
                }
            }
        }

        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        found.dedup();
        tracing::info!("Found {} capture file(s) in {}", found.len(), path.display());
        files.extend(found);
    }

    Ok(files)
}

/// Parse and assemble each file independently.
///
/// A file that fails to parse is recorded and skipped, or aborts the batch
/// when `fail_fast` is set.
pub fn build_reports(
    files: &[PathBuf],
    options: AssemblerOptions,
    fail_fast: bool,
) -> Result<BatchOutcome> {
    let assembler = ReportAssembler::new(options);
    let mut reports = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for file in files {
        match assembler.assemble_file(file) {
            Ok(report) => {
                if report.is_empty() {
                    tracing::warn!("{}: no valid requests, baseline omitted", file.display());
                }
                reports.push(report);
            }
            Err(e) if fail_fast => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping {}", e);
                failures.push(FileFailure {
                    file: file.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(BatchOutcome { reports, failures })
}

pub fn execute(
    paths: &[PathBuf],
    options: AssemblerOptions,
    fail_fast: bool,
    config: &RenderConfig,
) -> Result<()> {
    let files = collect_capture_files(paths)?;
    if files.is_empty() {
        bail!("No .har or .json capture files found");
    }

    tracing::info!("Building reports for {} file(s)", files.len());
    let outcome = build_reports(&files, options, fail_fast)?;

    render::render(&outcome, config)?;

    if outcome.reports.is_empty() {
        bail!("No capture file produced a report");
    }
    Ok(())
}
