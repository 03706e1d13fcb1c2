//! Error types for the dashboard core.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all dashboard operations.
///
/// Unknown stage keys are deliberately absent: they degrade to terminal
/// stages or empty status cells instead of failing.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Field-level validation failure; nothing was sent to the backend
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// No loaded order matches the given ID
    #[error("Order {id} not found")]
    OrderNotFound { id: String },
    /// Another assignment is still being submitted
    #[error("An assignment for order {id} is already being submitted")]
    SubmissionInProgress { id: String },
    /// The backend answered with a non-success status
    #[error("Rejected by backend: {message}")]
    Rejected { message: String },
    /// The request never got an answer
    #[error("Transport error: {message}")]
    Transport { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DashboardError {
        DashboardError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl DashboardError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Whether the error came back from the remote side, as opposed to a
    /// local validation or guard failure. Optimistic local changes are rolled
    /// back on these.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            DashboardError::Rejected { .. } | DashboardError::Transport { .. }
        )
    }

    /// The form field this error belongs to, if it is a validation error.
    pub fn field(&self) -> Option<&str> {
        match self {
            DashboardError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
