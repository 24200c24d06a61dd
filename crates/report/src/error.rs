//! Error types for report generation.

use thiserror::Error;
use wmt_scoreboard_core::MalformedTableError;

/// Errors that can occur while loading tables or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw tables failed validation.
    #[error("Malformed table: {0}")]
    Malformed(#[from] MalformedTableError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
