//! Summary-mode aggregation: scalar totals across a directory.
//!
//! Rows are folded into running totals as they are parsed and are never
//! retained.

use std::path::Path;

use erp_core::diagnostics::Diagnostics;
use erp_core::models::ParseMode;
use erp_core::summary::{RunningTotals, Summary};
use erp_core::{ErpError, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::reader::{find_csv_files, record_unreadable, visit_log_file};

// ── SummaryReport ─────────────────────────────────────────────────────────────

/// Totals over every accepted row of every file in a directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Totals and means over all rows, coil figures in first-seen order.
    pub summary: Summary,
    /// Sum over files of (first coil weight - last coil weight) within each
    /// file. Files without valid rows contribute nothing.
    pub coil_decrease_total: f64,
    /// Number of files that were read to the end.
    pub files_summarized: usize,
}

// ── SummaryAggregator ─────────────────────────────────────────────────────────

/// Accumulates per-file totals into directory totals.
#[derive(Debug, Clone, Default)]
pub struct SummaryAggregator {
    overall: RunningTotals,
    coil_decrease_total: f64,
    files_summarized: usize,
}

impl SummaryAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one fully-read file into the directory totals.
    pub fn add_file(&mut self, file_totals: &RunningTotals) {
        self.overall.merge(file_totals);
        self.coil_decrease_total += file_totals.coil_decrease();
        self.files_summarized += 1;
    }

    /// `None` when no file contributed a valid row.
    pub fn finish(self) -> Option<SummaryReport> {
        let summary = self.overall.finish()?;
        Some(SummaryReport {
            summary,
            coil_decrease_total: self.coil_decrease_total,
            files_summarized: self.files_summarized,
        })
    }
}

/// Summarise every CSV file in `dir` in summary mode.
///
/// Files are visited in path order. A file that fails part-way contributes
/// nothing. Fails with [`ErpError::EmptyResult`] when no valid row is found.
pub fn summarize_directory(dir: &Path, diags: &mut Diagnostics) -> Result<SummaryReport> {
    let files = find_csv_files(dir)?;
    diags.files_found(dir, files.len());

    let mut aggregator = SummaryAggregator::new();
    for file_path in &files {
        let mut file_totals = RunningTotals::default();
        match visit_log_file(file_path, ParseMode::Summary, diags, |row| {
            file_totals.add(&row)
        }) {
            Ok(_) => {
                debug!(
                    "{}: {} rows, coil decrease {:.3}",
                    file_path.display(),
                    file_totals.count(),
                    file_totals.coil_decrease()
                );
                aggregator.add_file(&file_totals);
            }
            Err(e) => record_unreadable(file_path, e, diags),
        }
    }

    aggregator.finish().ok_or_else(|| {
        warn!("No valid data found in any of the CSV files in {}", dir.display());
        ErpError::EmptyResult(dir.to_path_buf())
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
