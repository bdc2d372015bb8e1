//! Text and JSON summary reports.
//!
//! Lines are built as plain strings so they can be printed, written into the
//! chart header, or checked in tests.

use erp_core::formatting::{format_meters, format_number};
use erp_core::settings::ReportFormat;
use erp_core::summary::Summary;
use erp_core::Result;
use erp_data::aggregator::SummaryReport;
use erp_data::analysis::{AnalysisMetadata, AnalysisOutcome, AnalysisResult};
use serde::Serialize;

// ── Text lines ────────────────────────────────────────────────────────────────

/// Report lines for a time-series run.
pub fn time_series_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("Total number of components: {}", summary.count),
        format!("Total component length: {}", format_meters(summary.total_length_m, 2)),
        format!("Total component waste: {}", format_meters(summary.total_waste_m, 2)),
        format!("Average component length: {}", format_meters(summary.mean_length_m, 2)),
        format!("Average component waste: {}", format_meters(summary.mean_waste_m, 2)),
        format!("Initial component waste: {}", format_meters(summary.first_waste_m, 3)),
        format!(
            "Total length + waste: {}",
            format_meters(summary.total_length_with_waste_m, 2)
        ),
        format!("Initial coil value: {}", format_number(summary.first_coil_weight, 2)),
        format!("Coil length deducted: {}", format_number(summary.coil_consumed(), 2)),
    ]
}

/// Report lines for a summary-mode run, three decimals in meters without
/// digit grouping.
pub fn summary_mode_lines(report: &SummaryReport) -> Vec<String> {
    let s = &report.summary;
    vec![
        format!(
            "Total Coil Length Decrease: {:.3} meters",
            report.coil_decrease_total
        ),
        format!("Total Component Length: {:.3} meters", s.total_length_m),
        format!("Total Waste: {:.3} meters", s.total_waste_m),
        format!(
            "Total Component Length + Waste: {:.3} meters",
            s.total_length_with_waste_m
        ),
    ]
}

/// Compact lines for the info block above the time-series chart.
pub fn chart_header_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("Total Components: {}", summary.count),
        format!("Total Length: {}", format_meters(summary.total_length_m, 2)),
        format!("Total Waste: {}", format_meters(summary.total_waste_m, 2)),
        format!("Average Length: {}", format_meters(summary.mean_length_m, 2)),
        format!("Average Waste: {}", format_meters(summary.mean_waste_m, 2)),
        format!("Initial Waste: {}", format_meters(summary.first_waste_m, 3)),
        format!(
            "Total Length + Waste: {}",
            format_meters(summary.total_length_with_waste_m, 2)
        ),
        format!("Initial Coil Value: {}", format_number(summary.first_coil_weight, 2)),
        format!("Coil Deducted: {}", format_number(summary.coil_consumed(), 2)),
    ]
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    metadata: &'a AnalysisMetadata,
    summary: &'a Summary,
    coil_consumed: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    coil_decrease_total: Option<f64>,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the full report for `result` in `format`.
///
/// The text form ends with the run's file and row counts so that the data
/// quality can be judged at a glance.
pub fn render_report(result: &AnalysisResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => {
            let mut lines = match &result.outcome {
                AnalysisOutcome::TimeSeries { summary, .. } => time_series_lines(summary),
                AnalysisOutcome::Summary(report) => summary_mode_lines(report),
            };
            lines.push(result.metadata.tally.to_string());
            Ok(lines.join("\n"))
        }
        ReportFormat::Json => {
            let coil_decrease_total = match &result.outcome {
                AnalysisOutcome::TimeSeries { .. } => None,
                AnalysisOutcome::Summary(report) => Some(report.coil_decrease_total),
            };
            let summary = result.summary();
            let report = JsonReport {
                metadata: &result.metadata,
                summary,
                coil_consumed: summary.coil_consumed(),
                coil_decrease_total,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use erp_core::diagnostics::Tally;
    use erp_core::models::{LogDataset, LogRow, ParseMode};
    use std::path::PathBuf;

    fn summary() -> Summary {
        let rows: Vec<LogRow> = [(1.2, 0.05, 500.0), (3.4, 0.02, 300.0), (0.6, 0.01, 120.5)]
            .iter()
            .map(|&(l, w, c)| LogRow {
                timestamp: None,
                component_length_m: l,
                component_waste_m: w,
                coil_weight: c,
            })
            .collect();
        Summary::from_rows(&rows).unwrap()
    }

    fn metadata(mode: ParseMode) -> AnalysisMetadata {
        AnalysisMetadata {
            generated_at: "2024-02-01T08:00:00".to_string(),
            directory: PathBuf::from("/logs"),
            mode,
            tally: Tally {
                files_found: 1,
                files_read: 1,
                files_unreadable: 0,
                rows_accepted: 3,
                rows_rejected: 1,
            },
            load_time_seconds: 0.01,
            issues: Vec::new(),
        }
    }

    #[test]
    fn test_time_series_lines() {
        let lines = time_series_lines(&summary());
        assert_eq!(lines[0], "Total number of components: 3");
        assert_eq!(lines[1], "Total component length: 5.20 m");
        assert_eq!(lines[2], "Total component waste: 0.08 m");
        assert_eq!(lines[3], "Average component length: 1.73 m");
        assert_eq!(lines[5], "Initial component waste: 0.050 m");
        assert_eq!(lines.last().unwrap(), "Coil length deducted: 379.50");
    }

    #[test]
    fn test_summary_mode_lines() {
        let report = SummaryReport {
            summary: summary(),
            coil_decrease_total: 1234.5,
            files_summarized: 2,
        };
        let lines = summary_mode_lines(&report);
        assert_eq!(
            lines,
            vec![
                "Total Coil Length Decrease: 1234.500 meters",
                "Total Component Length: 5.200 meters",
                "Total Waste: 0.080 meters",
                "Total Component Length + Waste: 5.280 meters",
            ]
        );
    }

    #[test]
    fn test_chart_header_negative_coil_deducted() {
        let rows = vec![
            LogRow {
                timestamp: None,
                component_length_m: 1.0,
                component_waste_m: 0.0,
                coil_weight: 120.5,
            },
            LogRow {
                timestamp: None,
                component_length_m: 1.0,
                component_waste_m: 0.0,
                coil_weight: 500.0,
            },
        ];
        let lines = chart_header_lines(&Summary::from_rows(&rows).unwrap());
        assert_eq!(lines.last().unwrap(), "Coil Deducted: -379.50");
    }

    #[test]
    fn test_render_text_report_ends_with_tally() {
        let result = AnalysisResult {
            outcome: AnalysisOutcome::TimeSeries {
                dataset: LogDataset::default(),
                summary: summary(),
            },
            metadata: metadata(ParseMode::TimeSeries),
        };
        let text = render_report(&result, ReportFormat::Text).unwrap();
        assert!(text.starts_with("Total number of components: 3"));
        assert!(text.ends_with("3 rows accepted, 1 rejected"));
    }

    #[test]
    fn test_render_json_report() {
        let result = AnalysisResult {
            outcome: AnalysisOutcome::Summary(SummaryReport {
                summary: summary(),
                coil_decrease_total: 42.0,
                files_summarized: 1,
            }),
            metadata: metadata(ParseMode::Summary),
        };
        let json = render_report(&result, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "summary");
        assert_eq!(value["summary"]["count"], 3);
        assert_eq!(value["coil_decrease_total"], 42.0);
        assert_eq!(value["rows_rejected"], 1);
        assert!(value["issues"].as_array().unwrap().is_empty());
        assert!((value["coil_consumed"].as_f64().unwrap() - 379.5).abs() < 1e-9);
    }

    #[test]
    fn test_render_json_time_series_omits_decrease_total() {
        let result = AnalysisResult {
            outcome: AnalysisOutcome::TimeSeries {
                dataset: LogDataset::default(),
                summary: summary(),
            },
            metadata: metadata(ParseMode::TimeSeries),
        };
        let json = render_report(&result, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("coil_decrease_total").is_none());
    }
}
