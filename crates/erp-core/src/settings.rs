use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use crate::models::ParseMode;

// ── ReportFormat ───────────────────────────────────────────────────────────────

/// How the summary report is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate ERP coil-line CSV logs and chart component length, waste and coil weight
#[derive(Parser, Debug, Clone)]
#[command(
    name = "erp-vis",
    about = "Aggregate ERP coil-line CSV logs and chart component length, waste and coil weight",
    version
)]
pub struct Settings {
    /// Directory containing the ERP CSV log files
    #[arg(env = "ERP_VIS_DIR")]
    pub directory: Option<PathBuf>,

    /// Parsing mode
    #[arg(long, value_enum, default_value_t = ParseMode::TimeSeries, env = "ERP_VIS_MODE")]
    pub mode: ParseMode,

    /// Chart output path (.png or .svg)
    #[arg(long, short, env = "ERP_VIS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Skip chart rendering and only print the report
    #[arg(long)]
    pub no_chart: bool,

    /// Prompt for the directory and output path on the terminal
    #[arg(long)]
    pub pick: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Chart width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(200..=10_000))]
    pub width: Option<u32>,

    /// Chart height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(200..=10_000))]
    pub height: Option<u32>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, exiting
    /// with clap's usage message on invalid input.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// Fallible variant of [`Settings::load_from_args`].
    pub fn try_load_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// Apply the `--debug` flag.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Chart output path: `--output` when given, else the mode's default
    /// file name in the working directory.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.mode.default_chart_name()))
    }

    /// Chart size in pixels, falling back to a per-mode default.
    pub fn chart_size(&self) -> (u32, u32) {
        let (w, h) = match self.mode {
            ParseMode::TimeSeries => (1400, 800),
            ParseMode::Summary => (1000, 600),
        };
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn load(args: &[&str]) -> Settings {
        let mut full = vec!["erp-vis"];
        full.extend_from_slice(args);
        Settings::try_load_from_args(full).expect("valid args")
    }

    #[test]
    fn test_defaults() {
        let settings = load(&["/data/logs"]);
        assert_eq!(settings.directory.as_deref(), Some(Path::new("/data/logs")));
        assert_eq!(settings.mode, ParseMode::TimeSeries);
        assert_eq!(settings.format, ReportFormat::Text);
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.no_chart);
        assert!(!settings.pick);
        assert_eq!(settings.output_path(), PathBuf::from("erp_visualize.png"));
        assert_eq!(settings.chart_size(), (1400, 800));
    }

    #[test]
    fn test_summary_mode_defaults() {
        let settings = load(&["--mode", "summary", "/data/logs"]);
        assert_eq!(settings.mode, ParseMode::Summary);
        assert_eq!(settings.output_path(), PathBuf::from("coil_usage_summary.png"));
        assert_eq!(settings.chart_size(), (1000, 600));
    }

    #[test]
    fn test_explicit_output_and_size() {
        let settings = load(&[
            "--output", "out/chart.svg", "--width", "640", "--height", "480", "/logs",
        ]);
        assert_eq!(settings.output_path(), PathBuf::from("out/chart.svg"));
        assert_eq!(settings.chart_size(), (640, 480));
    }

    #[test]
    fn test_directory_is_optional() {
        let settings = load(&["--pick"]);
        assert!(settings.pick);
        // ERP_VIS_DIR is not set in the test environment.
        if std::env::var_os("ERP_VIS_DIR").is_none() {
            assert!(settings.directory.is_none());
        }
    }

    #[test]
    fn test_debug_overrides_log_level() {
        let settings = load(&["--log-level", "ERROR", "--debug"]);
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_json_format() {
        let settings = load(&["--format", "json", "/logs"]);
        assert_eq!(settings.format, ReportFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Settings::try_load_from_args(["erp-vis", "--mode", "weekly"]).is_err());
    }

    #[test]
    fn test_rejects_tiny_chart() {
        assert!(Settings::try_load_from_args(["erp-vis", "--width", "10"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Settings::try_load_from_args(["erp-vis", "--log-level", "TRACE"]).is_err());
    }
}
