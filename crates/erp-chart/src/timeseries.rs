//! Time-series chart: component length, coil weight and waste over time.
//!
//! Each series gets its own panel so that the three very different scales
//! stay readable; all panels share one time axis.

use std::ops::Range;

use chrono::{Duration, NaiveDateTime};
use erp_core::models::LogDataset;
use erp_core::summary::Summary;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::palette::{self, SeriesStyle};
use crate::report::chart_header_lines;

pub const TITLE: &str = "ERP Log: Component Length and Coil Weight Over Time";

const HEADER_HEIGHT: u32 = 130;
const HEADER_ROWS: usize = 5;
const HEADER_COLUMN_WIDTH: i32 = 320;
const HEADER_LINE_HEIGHT: i32 = 22;

// ── TimeAxis ──────────────────────────────────────────────────────────────────

/// Maps timestamps onto hours since the first row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    origin: NaiveDateTime,
    span_hours: f64,
}

impl TimeAxis {
    /// `None` when the dataset has no timestamped rows.
    pub fn from_dataset(dataset: &LogDataset) -> Option<Self> {
        let (first, last) = dataset.time_span()?;
        Some(Self {
            origin: first,
            span_hours: hours_between(first, last),
        })
    }

    pub fn offset_hours(&self, ts: NaiveDateTime) -> f64 {
        hours_between(self.origin, ts)
    }

    /// X range of the plot; a single instant is widened to one hour.
    pub fn range(&self) -> Range<f64> {
        if self.span_hours <= 0.0 {
            -0.5..0.5
        } else {
            0.0..self.span_hours
        }
    }

    /// Tick label for an offset in hours.
    pub fn label(&self, hours: f64) -> String {
        let ts = self.origin + Duration::seconds((hours * 3600.0).round() as i64);
        if self.span_hours > 48.0 {
            ts.format("%Y-%m-%d").to_string()
        } else {
            ts.format("%m-%d %H:%M").to_string()
        }
    }
}

fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

/// Y range covering `values` with a 5% margin; flat series get a unit band.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return 0.0..1.0;
    }
    let pad = (max - min) * 0.05;
    if pad <= 0.0 {
        let half = (min.abs() * 0.05).max(0.5);
        return (min - half)..(max + half);
    }
    (min - pad)..(max + pad)
}

// ── Drawing ───────────────────────────────────────────────────────────────────

/// Draw the full chart onto `root`.
pub fn draw_time_series<DB>(
    root: DrawingArea<DB, Shift>,
    dataset: &LogDataset,
    summary: &Summary,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let axis = TimeAxis::from_dataset(dataset)
        .ok_or_else(|| anyhow::anyhow!("no timestamped rows to plot"))?;

    root.fill(&WHITE)?;
    let root = root.titled(TITLE, (palette::FONT_FAMILY, 26))?;
    let (header, body) = root.split_vertically(HEADER_HEIGHT);

    let header_font = (palette::FONT_FAMILY, 15).into_font();
    for (i, line) in chart_header_lines(summary).into_iter().enumerate() {
        let col = (i / HEADER_ROWS) as i32;
        let row = (i % HEADER_ROWS) as i32;
        header.draw(&Text::new(
            line,
            (20 + col * HEADER_COLUMN_WIDTH, 10 + row * HEADER_LINE_HEIGHT),
            header_font.clone(),
        ))?;
    }

    let series: [(SeriesStyle, Vec<(f64, f64)>); 3] = [
        (
            palette::COMPONENT_LENGTH,
            dataset
                .series()
                .map(|(ts, length, _, _)| (axis.offset_hours(ts), length))
                .collect(),
        ),
        (
            palette::COIL_WEIGHT,
            dataset
                .series()
                .map(|(ts, _, coil, _)| (axis.offset_hours(ts), coil))
                .collect(),
        ),
        (
            palette::COMPONENT_WASTE,
            dataset
                .series()
                .map(|(ts, _, _, waste)| (axis.offset_hours(ts), waste))
                .collect(),
        ),
    ];

    let panels = body.split_evenly((series.len(), 1));
    for (panel, (style, points)) in panels.iter().zip(series.iter()) {
        draw_panel(panel, &axis, style, points)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB>(
    panel: &DrawingArea<DB, Shift>,
    axis: &TimeAxis,
    style: &SeriesStyle,
    points: &[(f64, f64)],
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_range = value_range(points.iter().map(|&(_, y)| y));

    let mut chart = ChartBuilder::on(panel)
        .margin(10)
        .caption(style.label, (palette::FONT_FAMILY, 16).into_font().color(&style.color))
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 35)
        .build_cartesian_2d(axis.range(), y_range)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&|x| axis.label(*x))
        .y_desc(style.axis_label)
        .light_line_style(palette::GRID.mix(0.5))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &style.color))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 2, style.color.filled())),
    )?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use erp_core::models::LogRow;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn dataset(stamps: &[&str]) -> LogDataset {
        LogDataset::from_rows(
            stamps
                .iter()
                .map(|s| LogRow {
                    timestamp: Some(ts(s)),
                    component_length_m: 1.0,
                    component_waste_m: 0.01,
                    coil_weight: 100.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_time_axis_offsets() {
        let ds = dataset(&["2024-02-01T06:00:00", "2024-02-01T09:30:00"]);
        let axis = TimeAxis::from_dataset(&ds).unwrap();
        assert_eq!(axis.range(), 0.0..3.5);
        assert!((axis.offset_hours(ts("2024-02-01T07:15:00")) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_time_axis_single_instant_is_widened() {
        let ds = dataset(&["2024-02-01T06:00:00"]);
        let axis = TimeAxis::from_dataset(&ds).unwrap();
        assert_eq!(axis.range(), -0.5..0.5);
    }

    #[test]
    fn test_time_axis_labels() {
        let short = TimeAxis::from_dataset(&dataset(&[
            "2024-02-01T06:00:00",
            "2024-02-01T18:00:00",
        ]))
        .unwrap();
        assert_eq!(short.label(1.5), "02-01 07:30");

        let long = TimeAxis::from_dataset(&dataset(&[
            "2024-02-01T06:00:00",
            "2024-02-10T06:00:00",
        ]))
        .unwrap();
        assert_eq!(long.label(48.0), "2024-02-03");
    }

    #[test]
    fn test_time_axis_requires_timestamps() {
        let ds = LogDataset::from_rows(vec![LogRow {
            timestamp: None,
            component_length_m: 1.0,
            component_waste_m: 0.0,
            coil_weight: 1.0,
        }]);
        assert!(TimeAxis::from_dataset(&ds).is_none());
    }

    #[test]
    fn test_value_range_pads() {
        let r = value_range([0.0, 10.0]);
        assert!((r.start + 0.5).abs() < 1e-9);
        assert!((r.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_value_range_flat_series() {
        let r = value_range([400.0, 400.0]);
        assert!(r.start < 400.0 && r.end > 400.0);
        let zero = value_range([0.0]);
        assert_eq!(zero, -0.5..0.5);
    }

    #[test]
    fn test_value_range_empty_or_non_finite() {
        assert_eq!(value_range(Vec::new()), 0.0..1.0);
        assert_eq!(value_range([f64::NAN]), 0.0..1.0);
    }
}
