//! Aggregate statistics over accepted log rows.

use serde::Serialize;

use crate::models::LogRow;

// ── RunningTotals ─────────────────────────────────────────────────────────────

/// Running sums accumulated one row at a time.
///
/// Used directly by summary mode, which never keeps the rows themselves.
#[derive(Debug, Clone, Default)]
pub struct RunningTotals {
    count: usize,
    total_length_m: f64,
    total_waste_m: f64,
    first_coil_weight: Option<f64>,
    last_coil_weight: Option<f64>,
    first_waste_m: Option<f64>,
}

impl RunningTotals {
    /// Add a single row's measurements to the running totals.
    pub fn add(&mut self, row: &LogRow) {
        self.count += 1;
        self.total_length_m += row.component_length_m;
        self.total_waste_m += row.component_waste_m;
        if self.first_coil_weight.is_none() {
            self.first_coil_weight = Some(row.coil_weight);
            self.first_waste_m = Some(row.component_waste_m);
        }
        self.last_coil_weight = Some(row.coil_weight);
    }

    /// Append `other` as if its rows had been added after this one's.
    pub fn merge(&mut self, other: &RunningTotals) {
        if other.is_empty() {
            return;
        }
        self.count += other.count;
        self.total_length_m += other.total_length_m;
        self.total_waste_m += other.total_waste_m;
        if self.first_coil_weight.is_none() {
            self.first_coil_weight = other.first_coil_weight;
            self.first_waste_m = other.first_waste_m;
        }
        self.last_coil_weight = other.last_coil_weight;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// First coil weight minus last coil weight seen so far, `0.0` when no
    /// row has been added.
    pub fn coil_decrease(&self) -> f64 {
        match (self.first_coil_weight, self.last_coil_weight) {
            (Some(first), Some(last)) => first - last,
            _ => 0.0,
        }
    }

    /// Close the accumulation.
    ///
    /// Returns `None` when no row was added; the means are only computed over
    /// a non-empty set.
    pub fn finish(self) -> Option<Summary> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(Summary {
            count: self.count,
            total_length_m: self.total_length_m,
            total_waste_m: self.total_waste_m,
            total_length_with_waste_m: self.total_length_m + self.total_waste_m,
            mean_length_m: self.total_length_m / n,
            mean_waste_m: self.total_waste_m / n,
            first_coil_weight: self.first_coil_weight?,
            last_coil_weight: self.last_coil_weight?,
            first_waste_m: self.first_waste_m?,
        })
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

/// Totals, means and coil figures over a non-empty set of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of accepted rows (components).
    pub count: usize,
    /// Sum of component lengths in meters.
    pub total_length_m: f64,
    /// Sum of component waste in meters.
    pub total_waste_m: f64,
    /// Length plus waste in meters.
    pub total_length_with_waste_m: f64,
    /// Mean component length in meters.
    pub mean_length_m: f64,
    /// Mean component waste in meters.
    pub mean_waste_m: f64,
    /// Coil weight of the first row (chronologically first in time-series
    /// mode, first seen in summary mode).
    pub first_coil_weight: f64,
    /// Coil weight of the last row.
    pub last_coil_weight: f64,
    /// Waste of the first row in meters.
    pub first_waste_m: f64,
}

impl Summary {
    /// Summarise `rows` in the order given, or `None` when `rows` is empty.
    pub fn from_rows(rows: &[LogRow]) -> Option<Self> {
        let mut totals = RunningTotals::default();
        for row in rows {
            totals.add(row);
        }
        totals.finish()
    }

    /// First coil weight minus last coil weight.
    ///
    /// Negative when the coil weight went up over the run, e.g. after a new
    /// coil was loaded.
    pub fn coil_consumed(&self) -> f64 {
        self.first_coil_weight - self.last_coil_weight
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
