use chrono::NaiveDateTime;
use serde::Serialize;

use crate::summary::Summary;

/// Which variant of the ERP export is being parsed.
///
/// The two variants differ in the minimum row width, in whether the first
/// record is a header, and in whether the timestamp column is read at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Per-row series ordered by timestamp, rendered over time.
    TimeSeries,
    /// Scalar totals only; rows are not retained.
    Summary,
}

impl ParseMode {
    /// Minimum number of fields a record needs before any field is parsed.
    pub fn min_columns(self) -> usize {
        match self {
            ParseMode::TimeSeries => 12,
            // Only indices up to 12 are read, but the export contract for this
            // variant asks for 14.
            ParseMode::Summary => 14,
        }
    }

    /// Whether the first record of every file is a header and must be skipped.
    ///
    /// The summary variant does not skip anything; a header row there is
    /// simply rejected like any other non-numeric row.
    pub fn skips_header(self) -> bool {
        matches!(self, ParseMode::TimeSeries)
    }

    /// Whether column 0 is parsed as a timestamp.
    pub fn reads_timestamp(self) -> bool {
        matches!(self, ParseMode::TimeSeries)
    }

    /// 1-based row number of the first record handed to the row parser.
    pub fn first_row_number(self) -> usize {
        if self.skips_header() {
            2
        } else {
            1
        }
    }

    /// Default file name for the rendered chart.
    pub fn default_chart_name(self) -> &'static str {
        match self {
            ParseMode::TimeSeries => "erp_visualize.png",
            ParseMode::Summary => "coil_usage_summary.png",
        }
    }
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::TimeSeries => write!(f, "time-series"),
            ParseMode::Summary => write!(f, "summary"),
        }
    }
}

/// One accepted CSV record from an ERP export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRow {
    /// Local time the component was produced; only read in time-series mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    /// Component length in meters.
    pub component_length_m: f64,
    /// Component waste in meters.
    pub component_waste_m: f64,
    /// Remaining coil weight/length, in the unit the export uses.
    pub coil_weight: f64,
}

/// Rows aggregated from every log file in a directory, ordered by timestamp.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogDataset {
    rows: Vec<LogRow>,
}

impl LogDataset {
    /// Build a dataset from unordered rows.
    ///
    /// Rows are stable-sorted by timestamp, so rows sharing a timestamp keep
    /// the order in which they were encountered.
    pub fn from_rows(mut rows: Vec<LogRow>) -> Self {
        rows.sort_by_key(|r| r.timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(timestamp, component_length_m, coil_weight, component_waste_m)` for
    /// every row that carries a timestamp, in chronological order.
    pub fn series(&self) -> impl Iterator<Item = (NaiveDateTime, f64, f64, f64)> + '_ {
        self.rows.iter().filter_map(|r| {
            r.timestamp
                .map(|ts| (ts, r.component_length_m, r.coil_weight, r.component_waste_m))
        })
    }

    /// First and last timestamp, if any row has one.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.rows.iter().find_map(|r| r.timestamp)?;
        let last = self.rows.iter().rev().find_map(|r| r.timestamp)?;
        Some((first, last))
    }

    /// Aggregate statistics, or `None` for an empty dataset.
    pub fn summary(&self) -> Option<Summary> {
        Summary::from_rows(&self.rows)
    }
}
