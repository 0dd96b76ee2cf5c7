//! Lifecycle of a single prediction submission.

use super::prediction::PredictionResult;

/// Message shown when the backend gives no usable error detail.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "Failed to get prediction. Please check if the backend server is running.";

/// Where the current submission stands. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request built and in flight
    Pending,
    /// Server answered with a result
    Success(PredictionResult),
    /// Submission failed; the message is user-facing
    Failed(String),
}

impl RequestState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
