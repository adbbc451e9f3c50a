use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the ticket toolkit.
///
/// Per-field problems (unparseable dates, missing columns, odd value
/// shapes) are never errors; they degrade to fallback values inside the
/// pipeline. Only whole-pass failures surface here.
#[derive(Error, Debug)]
pub enum TicketsError {
    /// The input artifact does not exist. The one pass-fatal condition
    /// for a normalization run.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular input could not be parsed at all (e.g. no header row).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

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

/// Convenience alias used throughout the ticket crates.
pub type Result<T> = std::result::Result<T, TicketsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_input_not_found() {
        let err = TicketsError::InputNotFound(PathBuf::from("/data/Jira.csv"));
        assert_eq!(err.to_string(), "Input file not found: /data/Jira.csv");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TicketsError::FileRead {
            path: PathBuf::from("/some/path.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/path.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_config() {
        let err = TicketsError::Config("JIRA_API_TOKEN is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: JIRA_API_TOKEN is not set"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TicketsError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
