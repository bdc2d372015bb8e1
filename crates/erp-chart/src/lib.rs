pub mod palette;
pub mod report;
pub mod summary_chart;
pub mod timeseries;

use std::path::Path;

use erp_core::{ErpError, Result};
use erp_data::analysis::{AnalysisOutcome, AnalysisResult};
use plotters::prelude::*;
use tracing::{debug, info};

/// Image format chosen from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    /// `.svg` (any case) selects SVG; everything else is written as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ChartFormat::Svg,
            _ => ChartFormat::Png,
        }
    }
}

/// Render the chart for `result` to `path`.
///
/// Time-series results produce the three-panel timeline, summary results the
/// three-point usage chart. The output directory must already exist.
pub fn render_chart(result: &AnalysisResult, path: &Path, size: (u32, u32)) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(ErpError::Config(format!(
                "output directory does not exist: {}",
                parent.display()
            )));
        }
    }

    let format = ChartFormat::from_path(path);
    debug!("rendering {:?} chart {}x{} to {}", format, size.0, size.1, path.display());

    let drawn = match (&result.outcome, format) {
        (AnalysisOutcome::TimeSeries { dataset, summary }, ChartFormat::Png) => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            timeseries::draw_time_series(root, dataset, summary)
        }
        (AnalysisOutcome::TimeSeries { dataset, summary }, ChartFormat::Svg) => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            timeseries::draw_time_series(root, dataset, summary)
        }
        (AnalysisOutcome::Summary(report), ChartFormat::Png) => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            summary_chart::draw_summary(root, report)
        }
        (AnalysisOutcome::Summary(report), ChartFormat::Svg) => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            summary_chart::draw_summary(root, report)
        }
    };
    drawn.map_err(|e| ErpError::Chart(format!("{:#}", e)))?;

    info!("chart written to {}", path.display());
    Ok(())
}
