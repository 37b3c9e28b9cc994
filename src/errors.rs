use thiserror::Error;

use crate::implementations::config::ConfigError;

/// Custom error types for the DocCompare system
#[derive(Debug, Error)]
pub enum DocCompareError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Portfolio error: {0}")]
    PortfolioError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
}

/// Result type specific to DocCompare operations
pub type DocCompareResult<T> = Result<T, DocCompareError>;

/// Failures scoped to a single clause. These never abort an analysis; the
/// risk engine logs them and moves on to the next clause.
#[derive(Debug, Error, PartialEq)]
pub enum ClauseError {
    #[error("{clause} clause not found")]
    NotFound { clause: String },

    #[error("could not read a number for {clause} from {raw:?}")]
    ValueParse { clause: String, raw: String },
}

/// Failures of the external explanation service. Always recovered from by
/// falling back to the deterministic explanation.
#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error: {status} - {message}")]
    HttpError {
        status: u16,
        message: String,
    },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Explanation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl DocCompareError {
    /// True when the caller sent something unusable, as opposed to a failure
    /// on our side.
    pub fn is_rejected_request(&self) -> bool {
        matches!(
            self,
            DocCompareError::MissingInput(_) |
                DocCompareError::InvalidPath(_) |
                DocCompareError::DocumentNotFound(_)
        )
    }
}
