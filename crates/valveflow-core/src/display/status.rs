//! Dialog-level status messages for operation feedback.

use std::fmt;

use crate::error::DashboardError;

/// Outcome line shown after an operator action.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Failure status for an error. Transport failures get a generic
    /// message; everything else shows the error itself.
    pub fn from_error(error: &DashboardError) -> Self {
        match error {
            DashboardError::Transport { .. } => {
                Self::failure("Could not reach the order service, please retry")
            }
            other => Self::failure(other.to_string()),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}
