//! Fixed-schema parser for a single ERP export record.
//!
//! Columns are positional and belong to the upstream export format; they are
//! not configurable.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{LogRow, ParseMode};

/// Column holding the ISO local timestamp.
pub const TIMESTAMP_COLUMN: usize = 0;
/// Column holding the remaining coil weight/length.
pub const COIL_WEIGHT_COLUMN: usize = 5;
/// Column holding the component length in millimeters.
pub const COMPONENT_LENGTH_COLUMN: usize = 11;
/// Column holding the component waste in millimeters.
pub const COMPONENT_WASTE_COLUMN: usize = 12;

/// Format of the timestamp column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const MM_PER_M: f64 = 1000.0;

// ── Rejections ────────────────────────────────────────────────────────────────

/// Why a record was not accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// The record is narrower than the mode requires.
    TooFewColumns { found: usize, required: usize },
    /// A required field is missing or does not parse as its type.
    Conversion {
        column: usize,
        value: Option<String>,
        message: String,
    },
    /// The CSV layer could not decode the record at all.
    Unreadable { message: String },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooFewColumns { found, required } => {
                write!(f, "insufficient columns ({} of {})", found, required)
            }
            RejectReason::Conversion {
                column,
                value: Some(value),
                message,
            } => write!(f, "column {} value {:?}: {}", column, value, message),
            RejectReason::Conversion {
                column,
                value: None,
                message,
            } => write!(f, "column {}: {}", column, message),
            RejectReason::Unreadable { message } => write!(f, "unreadable record: {}", message),
        }
    }
}

/// A rejected record together with enough context to report it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRejection {
    /// 1-based row number within the file (the header counts as row 1).
    pub row_number: usize,
    pub reason: RejectReason,
    /// The record's fields as read.
    pub raw: Vec<String>,
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// Parse one record into a [`LogRow`].
///
/// Fields are converted in the order timestamp (time-series mode only),
/// component length, component waste, coil weight; the first failure is the
/// one reported.
pub fn parse_row<S: AsRef<str>>(
    row_number: usize,
    fields: &[S],
    mode: ParseMode,
) -> Result<LogRow, RowRejection> {
    let reject = |reason: RejectReason| RowRejection {
        row_number,
        reason,
        raw: fields.iter().map(|f| f.as_ref().to_string()).collect(),
    };

    let required = mode.min_columns();
    if fields.len() < required {
        return Err(reject(RejectReason::TooFewColumns {
            found: fields.len(),
            required,
        }));
    }

    let timestamp = if mode.reads_timestamp() {
        Some(parse_timestamp(fields, TIMESTAMP_COLUMN).map_err(reject)?)
    } else {
        None
    };
    let component_length_m =
        parse_number(fields, COMPONENT_LENGTH_COLUMN).map_err(reject)? / MM_PER_M;
    let component_waste_m =
        parse_number(fields, COMPONENT_WASTE_COLUMN).map_err(reject)? / MM_PER_M;
    let coil_weight = parse_number(fields, COIL_WEIGHT_COLUMN).map_err(reject)?;

    Ok(LogRow {
        timestamp,
        component_length_m,
        component_waste_m,
        coil_weight,
    })
}

fn field<S: AsRef<str>>(fields: &[S], column: usize) -> Result<&str, RejectReason> {
    fields
        .get(column)
        .map(|f| f.as_ref())
        .ok_or_else(|| RejectReason::Conversion {
            column,
            value: None,
            message: "index out of range".to_string(),
        })
}

/// Numbers may carry surrounding whitespace; nothing else is tolerated.
fn parse_number<S: AsRef<str>>(fields: &[S], column: usize) -> Result<f64, RejectReason> {
    let raw = field(fields, column)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|e| RejectReason::Conversion {
            column,
            value: Some(raw.to_string()),
            message: e.to_string(),
        })
}

fn parse_timestamp<S: AsRef<str>>(
    fields: &[S],
    column: usize,
) -> Result<NaiveDateTime, RejectReason> {
    let raw = field(fields, column)?;
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| RejectReason::Conversion {
        column,
        value: Some(raw.to_string()),
        message: e.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
