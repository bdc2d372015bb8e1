use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the ERP log tooling.
///
/// Row-level problems are not errors: a rejected row is recorded as a
/// diagnostic and processing continues. Only directory-level failures end a
/// run.
#[derive(Error, Debug)]
pub enum ErpError {
    /// The supplied directory does not exist or is not a directory.
    #[error("Directory not available: {0}")]
    DirectoryUnavailable(PathBuf),

    /// No valid rows were found in any CSV file of the directory.
    #[error("No valid data found in any of the CSV files in {0}")]
    EmptyResult(PathBuf),

    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be serialised to JSON.
    #[error("Failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),

    /// The chart backend failed to draw or write the image.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ErpError {
    /// `true` for the "no data" condition, which callers report rather than
    /// treat as a failure.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ErpError::EmptyResult(_))
    }
}

/// Convenience alias used throughout the erp crates.
pub type Result<T> = std::result::Result<T, ErpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_directory_unavailable() {
        let err = ErpError::DirectoryUnavailable(PathBuf::from("/missing/dir"));
        assert_eq!(err.to_string(), "Directory not available: /missing/dir");
    }

    #[test]
    fn test_error_display_empty_result() {
        let err = ErpError::EmptyResult(PathBuf::from("/empty/dir"));
        assert_eq!(
            err.to_string(),
            "No valid data found in any of the CSV files in /empty/dir"
        );
        assert!(err.is_empty_result());
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ErpError::FileRead {
            path: PathBuf::from("/logs/line1.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/logs/line1.csv"));
        assert!(msg.contains("no such file"));
        assert!(!err.is_empty_result());
    }

    #[test]
    fn test_error_display_chart() {
        let err = ErpError::Chart("backend exploded".to_string());
        assert_eq!(err.to_string(), "Chart rendering failed: backend exploded");
    }

    #[test]
    fn test_error_display_config() {
        let err = ErpError::Config("width must be positive".to_string());
        assert_eq!(err.to_string(), "Configuration error: width must be positive");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ErpError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: ErpError = anyhow::anyhow!("plotting error").into();
        assert_eq!(err.to_string(), "plotting error");
    }
}
