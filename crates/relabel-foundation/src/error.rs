//! Error handling for relabel

use thiserror::Error;

/// Error type used throughout relabel
///
/// Expected "no refactor available" outcomes are never errors; they travel as
/// `None` or an empty list. This type covers configuration and I/O problems,
/// backend failures (absorbed by the engine before they reach a caller) and
/// the invariant violations that must stop a rename outright.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelabelError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Analysis backend error during {operation}: {message}")]
    Backend { operation: String, message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("Stale edit at {row}:{column}: expected {expected:?}, found {found:?}")]
    StaleEdit {
        row: u32,
        column: u32,
        expected: String,
        found: String,
    },
}

impl RelabelError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new backend error for the named backend operation
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a new invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Get the error category for structured logging
    pub fn category(&self) -> &'static str {
        match self {
            RelabelError::Config { .. } => "config_error",
            RelabelError::Io(_) => "io_error",
            RelabelError::Json(_) => "serialization_error",
            RelabelError::Backend { .. } => "backend_error",
            RelabelError::InvalidRequest { .. } => "invalid_request",
            RelabelError::InvariantViolation { .. } => "invariant_violation",
            RelabelError::StaleEdit { .. } => "stale_edit",
        }
    }

    /// Whether this error signals a bug rather than an operational failure
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RelabelError::InvariantViolation { .. } | RelabelError::InvalidRequest { .. }
        )
    }
}

/// Result type alias for convenience
pub type RelabelResult<T> = Result<T, RelabelError>;
