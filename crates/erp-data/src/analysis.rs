//! Top-level analysis pipeline.
//!
//! Runs the aggregator for the chosen mode over one directory and returns the
//! outcome together with run metadata, ready for the chart and report layer.

use std::path::{Path, PathBuf};

use chrono::Local;
use erp_core::diagnostics::{Diagnostic, Diagnostics, Tally};
use erp_core::models::{LogDataset, ParseMode};
use erp_core::summary::Summary;
use erp_core::{ErpError, Result};
use serde::Serialize;
use tracing::info;

use crate::aggregator::{summarize_directory, SummaryReport};
use crate::reader::load_time_series;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis outcome.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 local time when this result was generated.
    pub generated_at: String,
    /// The directory that was analysed.
    pub directory: PathBuf,
    pub mode: ParseMode,
    /// File and row counts from the diagnostic stream.
    #[serde(flatten)]
    pub tally: Tally,
    /// Wall-clock seconds spent reading and aggregating.
    pub load_time_seconds: f64,
    /// Skipped rows and unreadable files.
    pub issues: Vec<Diagnostic>,
}

/// What the pipeline produced for each mode.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    /// Time-ordered rows with their summary.
    TimeSeries {
        dataset: LogDataset,
        summary: Summary,
    },
    /// Scalar totals only.
    Summary(SummaryReport),
}

/// The complete output of [`analyze_directory`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub outcome: AnalysisOutcome,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// The summary statistics, whichever mode produced them.
    pub fn summary(&self) -> &Summary {
        match &self.outcome {
            AnalysisOutcome::TimeSeries { summary, .. } => summary,
            AnalysisOutcome::Summary(report) => &report.summary,
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over `dir`.
///
/// 1. Enumerate the `.csv` files directly inside `dir`.
/// 2. Parse every file in `mode`, recording skipped rows and files in `diags`.
/// 3. Merge (time-series) or accumulate (summary).
/// 4. Compute the summary statistics.
///
/// Fails with [`ErpError::DirectoryUnavailable`] before any file is read, or
/// with [`ErpError::EmptyResult`] when no valid row was found.
pub fn analyze_directory(
    dir: &Path,
    mode: ParseMode,
    diags: &mut Diagnostics,
) -> Result<AnalysisResult> {
    let load_start = std::time::Instant::now();

    let outcome = match mode {
        ParseMode::TimeSeries => {
            let dataset = load_time_series(dir, diags)?;
            let summary = dataset
                .summary()
                .ok_or_else(|| ErpError::EmptyResult(dir.to_path_buf()))?;
            AnalysisOutcome::TimeSeries { dataset, summary }
        }
        ParseMode::Summary => AnalysisOutcome::Summary(summarize_directory(dir, diags)?),
    };

    let load_time = load_start.elapsed().as_secs_f64();
    let tally = diags.tally();
    info!("{} ({:.3}s)", tally, load_time);

    Ok(AnalysisResult {
        outcome,
        metadata: AnalysisMetadata {
            generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            directory: dir.to_path_buf(),
            mode,
            tally,
            load_time_seconds: load_time,
            issues: diags.issues(),
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
