//! Dataset error types
//!
//! Every variant means the dataset is unavailable: the dashboard cannot
//! render without it, so callers treat these as fatal at start-up.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DataError {
    /// The CSV file does not exist
    #[error("Dataset not found: {0:?}")]
    NotFound(PathBuf),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error (unbalanced quotes, invalid UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks one or more required columns
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A data row could not be turned into a record
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Header present but no data rows
    #[error("Dataset contains no rows")]
    Empty,
}

/// Result type alias for dataset operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::MissingColumns(vec!["Continent".to_string(), "Total Deaths".to_string()]);
        assert_eq!(
            err.to_string(),
            "Missing required columns: Continent, Total Deaths"
        );

        let err = DataError::MalformedRow {
            line: 4,
            reason: "invalid digit".to_string(),
        };
        assert_eq!(err.to_string(), "Malformed row at line 4: invalid digit");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let data_err: DataError = io_err.into();
        assert!(matches!(data_err, DataError::Io(_)));
    }
}
