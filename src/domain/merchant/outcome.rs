//! Outcome of a merchant API call.

use serde::{Deserialize, Serialize};

/// Result of every merchant API operation.
///
/// Failures are values, not errors: callers branch on the variant instead of
/// handling a `Result` error path. Success is decided by the variant alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The server accepted the request.
    ///
    /// `content` is the raw response body, or the refund token for refund
    /// creation.
    Success { content: String },

    /// The request failed at the transport or HTTP level.
    Failed { error: String },
}

impl Outcome {
    /// Creates a success outcome.
    pub fn success(content: impl Into<String>) -> Self {
        Outcome::Success {
            content: content.into(),
        }
    }

    /// Creates a failed outcome.
    pub fn failed(error: impl Into<String>) -> Self {
        Outcome::Failed {
            error: error.into(),
        }
    }

    /// Returns true for the `Success` variant.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Returns the success content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Outcome::Success { content } => Some(content),
            Outcome::Failed { .. } => None,
        }
    }

    /// Returns the error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failed { error } => Some(error),
        }
    }

    /// Converts into a standard `Result` for callers that prefer `?`.
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Outcome::Success { content } => Ok(content),
            Outcome::Failed { error } => Err(error),
        }
    }
}
