//! CSV log discovery and loading.
//!
//! Finds the ERP export files in a directory, runs every record through the
//! row parser and merges the accepted rows into a [`LogDataset`].

use std::io::Read;
use std::path::{Path, PathBuf};

use erp_core::diagnostics::Diagnostics;
use erp_core::models::{LogDataset, LogRow, ParseMode};
use erp_core::row_parser::{parse_row, RejectReason, RowRejection};
use erp_core::{ErpError, Result};
use tracing::{debug, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Accepted and rejected record counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileCounts {
    pub accepted: usize,
    pub rejected: usize,
}

/// Accepted rows of one file in file order, plus its counts.
#[derive(Debug, Clone, Default)]
pub struct FileParse {
    pub rows: Vec<LogRow>,
    pub counts: FileCounts,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find the `.csv` files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched. A `.csv` entry whose metadata cannot be
/// read, such as a dangling symlink, is still returned so that the failure
/// surfaces when the file is opened. Fails with
/// [`ErpError::DirectoryUnavailable`] when `dir` is missing or not a
/// directory.
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!("Directory not available: {}", dir.display());
        return Err(ErpError::DirectoryUnavailable(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() && has_csv_name(entry.path()) => {
                Some(entry.into_path())
            }
            Ok(_) => None,
            // Unresolvable `.csv` entries (e.g. dangling symlinks) stay in the
            // list so that opening them fails and is recorded per file.
            Err(e) => match e.path() {
                Some(path) if has_csv_name(path) => {
                    debug!("Unresolvable entry {}: {}", path.display(), e);
                    Some(path.to_path_buf())
                }
                _ => {
                    warn!("Skipping directory entry in {}: {}", dir.display(), e);
                    None
                }
            },
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Load every CSV file in `dir` in time-series mode and merge the rows in
/// timestamp order.
///
/// Unreadable files are skipped and recorded in `diags`. Fails with
/// [`ErpError::EmptyResult`] when no file yields a valid row.
pub fn load_time_series(dir: &Path, diags: &mut Diagnostics) -> Result<LogDataset> {
    let files = find_csv_files(dir)?;
    diags.files_found(dir, files.len());

    let mut all_rows: Vec<LogRow> = Vec::new();
    for file_path in &files {
        match parse_log_file(file_path, ParseMode::TimeSeries, diags) {
            Ok(parse) => all_rows.extend(parse.rows),
            Err(e) => record_unreadable(file_path, e, diags),
        }
    }

    if all_rows.is_empty() {
        warn!("No valid data found in any of the CSV files in {}", dir.display());
        return Err(ErpError::EmptyResult(dir.to_path_buf()));
    }

    let dataset = LogDataset::from_rows(all_rows);
    debug!(
        "Loaded {} rows from {} files in {}",
        dataset.len(),
        files.len(),
        dir.display()
    );
    Ok(dataset)
}

/// Parse one file and return its accepted rows in file order.
pub fn parse_log_file(
    file_path: &Path,
    mode: ParseMode,
    diags: &mut Diagnostics,
) -> Result<FileParse> {
    let mut rows = Vec::new();
    let counts = visit_log_file(file_path, mode, diags, |row| rows.push(row))?;
    Ok(FileParse { rows, counts })
}

/// Parse one file, handing each accepted row to `on_row`.
///
/// The file handle is closed before this returns. A file whose rows are all
/// invalid is not an error.
pub fn visit_log_file(
    file_path: &Path,
    mode: ParseMode,
    diags: &mut Diagnostics,
    on_row: impl FnMut(LogRow),
) -> Result<FileCounts> {
    debug!("Parsing file: {}", file_path.display());

    let file = std::fs::File::open(file_path).map_err(|source| ErpError::FileRead {
        path: file_path.to_path_buf(),
        source,
    })?;
    let counts = read_records(file, file_path, mode, diags, on_row)?;

    diags.file_parsed(file_path, counts.accepted, counts.rejected);
    Ok(counts)
}

/// Run the row parser over every record from `reader`.
///
/// In time-series mode the first record is a header and is skipped unread.
/// Records the CSV layer cannot decode are rejected like malformed rows; an
/// I/O failure of the underlying reader aborts the file.
pub fn read_records<R: Read>(
    reader: R,
    source: &Path,
    mode: ParseMode,
    diags: &mut Diagnostics,
    mut on_row: impl FnMut(LogRow),
) -> Result<FileCounts> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = csv_reader.records();

    if mode.skips_header() {
        if let Some(Err(e)) = records.next() {
            if e.is_io_error() {
                return Err(into_file_error(source, e));
            }
            debug!("Unreadable header in {}: {}", source.display(), e);
        }
    }

    let mut counts = FileCounts::default();
    for (offset, result) in records.enumerate() {
        let row_number = mode.first_row_number() + offset;

        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(into_file_error(source, e)),
            Err(e) => {
                counts.rejected += 1;
                diags.row_rejected(
                    source,
                    RowRejection {
                        row_number,
                        reason: RejectReason::Unreadable {
                            message: e.to_string(),
                        },
                        raw: Vec::new(),
                    },
                );
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        match parse_row(row_number, &fields, mode) {
            Ok(row) => {
                counts.accepted += 1;
                on_row(row);
            }
            Err(rejection) => {
                counts.rejected += 1;
                diags.row_rejected(source, rejection);
            }
        }
    }

    Ok(counts)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn has_csv_name(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".csv"))
}

/// Convert a CSV-layer I/O failure into a per-file read error.
fn into_file_error(source: &Path, err: csv::Error) -> ErpError {
    let io = match err.into_kind() {
        csv::ErrorKind::Io(io) => io,
        other => std::io::Error::other(format!("{:?}", other)),
    };
    ErpError::FileRead {
        path: source.to_path_buf(),
        source: io,
    }
}

/// Record a per-file failure and carry on with the next file.
pub(crate) fn record_unreadable(file_path: &Path, err: ErpError, diags: &mut Diagnostics) {
    let message = match err {
        ErpError::FileRead { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    diags.file_unreadable(file_path, message);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
