//! Error types for the simmstring matcher.
//!
//! The selector itself cannot fail. Everything here is surfaced by the
//! collaborators around it (line sources, configuration, record sinks) and
//! is propagated to the caller instead of being swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for simmstring operations.
#[derive(Debug, Error)]
pub enum SimmError {
    /// A line source could not be opened.
    #[error("Input unavailable: {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line source failed after it was opened.
    #[error("Input read interrupted: {} at line {line}: {reason}", path.display())]
    InputReadInterrupted {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// Matching parameters rejected before any input is read.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// CSV serialization errors
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output stream errors
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl SimmError {
    /// Whether the error was raised by an input line source.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SimmError::InputUnavailable { .. } | SimmError::InputReadInterrupted { .. }
        )
    }
}

/// Result type alias for simmstring operations
pub type Result<T> = std::result::Result<T, SimmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimmError::InvalidConfiguration("num_matches must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: num_matches must be at least 1"
        );

        let err = SimmError::InputReadInterrupted {
            path: PathBuf::from("names.txt"),
            line: 12,
            reason: "stream did not contain valid UTF-8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Input read interrupted: names.txt at line 12: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_input_error_classification() {
        let unavailable = SimmError::InputUnavailable {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(unavailable.is_input_error());
        assert!(!SimmError::InvalidConfiguration("k".into()).is_input_error());
        assert!(!SimmError::Output(std::io::Error::other("closed")).is_input_error());
    }
}
