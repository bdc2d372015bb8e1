//! Append-only collector for skipped rows, skipped files and progress notes.
//!
//! The collector is passed explicitly through the parser and aggregator
//! calls. Every entry is also emitted as a `tracing` event so that a run
//! without a UI still leaves a complete log.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::row_parser::{RejectReason, RowRejection};

/// One line of the diagnostic stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    /// CSV files discovered in the chosen directory.
    FilesFound { dir: PathBuf, count: usize },
    /// A record was skipped.
    RowRejected { file: PathBuf, rejection: RowRejection },
    /// A file could not be opened or read and was skipped.
    FileUnreadable { file: PathBuf, message: String },
    /// A file was fully consumed.
    FileParsed {
        file: PathBuf,
        accepted: usize,
        rejected: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FilesFound { count, .. } => {
                write!(f, "Found {} CSV files in the directory", count)
            }
            Diagnostic::RowRejected { file, rejection } => match &rejection.reason {
                RejectReason::TooFewColumns { .. } => write!(
                    f,
                    "Row {} has insufficient columns: {:?}",
                    rejection.row_number, rejection.raw
                ),
                reason => write!(
                    f,
                    "Error in file {}, row {}: {}\nRow content: {:?}",
                    file.display(),
                    rejection.row_number,
                    reason,
                    rejection.raw
                ),
            },
            Diagnostic::FileUnreadable { file, message } => {
                write!(f, "Skipping unreadable file {}: {}", file.display(), message)
            }
            Diagnostic::FileParsed { file, accepted, .. } => {
                write!(f, "Found {} valid entries in {}", accepted, file.display())
            }
        }
    }
}

/// Aggregate counts over a diagnostic stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub files_found: usize,
    pub files_read: usize,
    pub files_unreadable: usize,
    pub rows_accepted: usize,
    pub rows_rejected: usize,
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files found, {} read, {} unreadable; {} rows accepted, {} rejected",
            self.files_found,
            self.files_read,
            self.files_unreadable,
            self.rows_accepted,
            self.rows_rejected
        )
    }
}

/// Collects [`Diagnostic`] entries in the order they happen.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files_found(&mut self, dir: &Path, count: usize) {
        let entry = Diagnostic::FilesFound {
            dir: dir.to_path_buf(),
            count,
        };
        info!("{}", entry);
        self.entries.push(entry);
    }

    pub fn row_rejected(&mut self, file: &Path, rejection: RowRejection) {
        let entry = Diagnostic::RowRejected {
            file: file.to_path_buf(),
            rejection,
        };
        warn!("{}", entry);
        self.entries.push(entry);
    }

    pub fn file_unreadable(&mut self, file: &Path, message: impl Into<String>) {
        let entry = Diagnostic::FileUnreadable {
            file: file.to_path_buf(),
            message: message.into(),
        };
        warn!("{}", entry);
        self.entries.push(entry);
    }

    pub fn file_parsed(&mut self, file: &Path, accepted: usize, rejected: usize) {
        let entry = Diagnostic::FileParsed {
            file: file.to_path_buf(),
            accepted,
            rejected,
        };
        info!("{}", entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Only the skipped rows.
    pub fn rejections(&self) -> impl Iterator<Item = (&Path, &RowRejection)> {
        self.entries.iter().filter_map(|e| match e {
            Diagnostic::RowRejected { file, rejection } => Some((file.as_path(), rejection)),
            _ => None,
        })
    }

    /// Skipped rows and unreadable files, in the order they were recorded.
    pub fn issues(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Diagnostic::RowRejected { .. } | Diagnostic::FileUnreadable { .. }
                )
            })
            .cloned()
            .collect()
    }

    /// Count files and rows across everything recorded so far.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for entry in &self.entries {
            match entry {
                Diagnostic::FilesFound { count, .. } => tally.files_found += count,
                Diagnostic::RowRejected { .. } => {}
                Diagnostic::FileUnreadable { .. } => tally.files_unreadable += 1,
                Diagnostic::FileParsed {
                    accepted, rejected, ..
                } => {
                    tally.files_read += 1;
                    tally.rows_accepted += accepted;
                    tally.rows_rejected += rejected;
                }
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_rejection(row_number: usize) -> RowRejection {
        RowRejection {
            row_number,
            reason: RejectReason::TooFewColumns {
                found: 2,
                required: 12,
            },
            raw: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn test_entries_kept_in_order() {
        let mut diags = Diagnostics::new();
        let file = Path::new("/logs/a.csv");
        diags.files_found(Path::new("/logs"), 1);
        diags.row_rejected(file, short_rejection(3));
        diags.file_parsed(file, 4, 1);

        assert_eq!(diags.entries().len(), 3);
        assert!(matches!(diags.entries()[0], Diagnostic::FilesFound { count: 1, .. }));
        assert!(matches!(diags.entries()[2], Diagnostic::FileParsed { accepted: 4, .. }));
        assert_eq!(diags.rejections().count(), 1);
    }

    #[test]
    fn test_tally() {
        let mut diags = Diagnostics::new();
        diags.files_found(Path::new("/logs"), 3);
        diags.file_parsed(Path::new("/logs/a.csv"), 10, 2);
        diags.file_parsed(Path::new("/logs/b.csv"), 5, 0);
        diags.file_unreadable(Path::new("/logs/c.csv"), "permission denied");

        let tally = diags.tally();
        assert_eq!(
            tally,
            Tally {
                files_found: 3,
                files_read: 2,
                files_unreadable: 1,
                rows_accepted: 15,
                rows_rejected: 2,
            }
        );
        assert_eq!(
            tally.to_string(),
            "3 files found, 2 read, 1 unreadable; 15 rows accepted, 2 rejected"
        );
    }

    #[test]
    fn test_issues_keep_only_skips() {
        let mut diags = Diagnostics::new();
        let file = Path::new("/logs/a.csv");
        diags.files_found(Path::new("/logs"), 2);
        diags.row_rejected(file, short_rejection(3));
        diags.file_parsed(file, 4, 1);
        diags.file_unreadable(Path::new("/logs/b.csv"), "not found");

        let issues = diags.issues();
        assert_eq!(issues.len(), 2);
        assert!(matches!(issues[0], Diagnostic::RowRejected { .. }));
        assert!(matches!(issues[1], Diagnostic::FileUnreadable { .. }));
    }

    #[test]
    fn test_rejection_serialises_with_event_and_kind() {
        let entry = Diagnostic::RowRejected {
            file: PathBuf::from("a.csv"),
            rejection: short_rejection(7),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"], "row_rejected");
        assert_eq!(json["rejection"]["row_number"], 7);
        assert_eq!(json["rejection"]["reason"]["kind"], "too_few_columns");
        assert_eq!(json["rejection"]["reason"]["required"], 12);
        assert_eq!(json["rejection"]["raw"][1], "b");
    }

    #[test]
    fn test_display_insufficient_columns() {
        let entry = Diagnostic::RowRejected {
            file: PathBuf::from("/logs/a.csv"),
            rejection: short_rejection(7),
        };
        assert_eq!(
            entry.to_string(),
            "Row 7 has insufficient columns: [\"a\", \"b\"]"
        );
    }

    #[test]
    fn test_display_conversion_error() {
        let entry = Diagnostic::RowRejected {
            file: PathBuf::from("a.csv"),
            rejection: RowRejection {
                row_number: 3,
                reason: RejectReason::Conversion {
                    column: 11,
                    value: Some("abc".to_string()),
                    message: "invalid float literal".to_string(),
                },
                raw: vec!["abc".to_string()],
            },
        };
        let text = entry.to_string();
        assert!(text.starts_with("Error in file a.csv, row 3: column 11 value \"abc\""));
        assert!(text.ends_with("Row content: [\"abc\"]"));
    }
}
