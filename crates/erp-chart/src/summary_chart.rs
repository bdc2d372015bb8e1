//! Summary chart: coil decrease, component length and waste as three points.

use std::ops::Range;

use erp_data::aggregator::SummaryReport;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::palette;

pub const TITLE: &str = "Summary of Coil Usage";

pub const CATEGORIES: [&str; 3] = ["Coil Length Decrease", "Component Length", "Waste"];

/// Label for a category position on the x axis; blank between categories.
pub fn category_label(x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    CATEGORIES
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// The plotted values, in [`CATEGORIES`] order.
pub fn category_values(report: &SummaryReport) -> [f64; 3] {
    [
        report.coil_decrease_total,
        report.summary.total_length_m,
        report.summary.total_waste_m,
    ]
}

/// Y range that always includes zero, with 10% headroom for annotations.
pub fn summary_range(values: &[f64]) -> Range<f64> {
    let lo = values.iter().copied().fold(0.0_f64, f64::min);
    let hi = values.iter().copied().fold(0.0_f64, f64::max);
    let span = hi - lo;
    if span <= 0.0 {
        return -1.0..1.0;
    }
    let pad = span * 0.1;
    let start = if lo < 0.0 { lo - pad } else { 0.0 };
    start..(hi + pad)
}

/// Draw the summary chart onto `root`.
pub fn draw_summary<DB>(root: DrawingArea<DB, Shift>, report: &SummaryReport) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let values = category_values(report);
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, (palette::FONT_FAMILY, 26))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(-0.5..2.5, summary_range(&values))?;

    chart
        .configure_mesh()
        .x_labels(CATEGORIES.len() * 4 + 1)
        .x_label_formatter(&|x| category_label(*x))
        .y_desc("Length (meters)")
        .light_line_style(palette::GRID.mix(0.5))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &palette::SUMMARY_LINE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 5, palette::SUMMARY_LINE.filled())),
    )?;

    let annotation_font = (palette::FONT_FAMILY, 15).into_font().color(&BLACK);
    chart.draw_series(points.iter().map(|&(x, y)| {
        EmptyElement::at((x, y))
            + Text::new(format!("{:.3}", y), (8, -20), annotation_font.clone())
    }))?;

    root.present()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
