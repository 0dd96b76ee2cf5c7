//! Prediction API port: Trait for the remote prediction backend.
//!
//! This trait abstracts the transport (HTTP) from the application logic so
//! the controller can be exercised against an in-process fake.

use crate::domain::{
    DataStats, HealthStatus, ModelInfo, ModelMetrics, PredictionRequest, PredictionResult,
    FALLBACK_ERROR_MESSAGE,
};

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Server unreachable, connection reset, timeout.
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// Non-success status, with the server's `detail` if it sent one.
    #[error("Backend returned HTTP {status}")]
    Server { status: u16, detail: Option<String> },

    /// Success status but a body that does not match the contract.
    #[error("Malformed backend response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text to show the user: the server's detail verbatim when present,
    /// otherwise the fixed fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Operations offered by the prediction backend.
///
/// One call is one attempt; implementations must not retry.
pub trait PredictionApi: Send + Sync {
    /// `POST /api/predict`
    ///
    /// # Errors
    /// Returns error on transport failure, non-2xx status, or bad body.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError>;

    /// `GET /api/model-info`
    ///
    /// # Errors
    /// Same as [`PredictionApi::predict`].
    fn model_info(&self) -> Result<ModelInfo, ApiError>;

    /// `GET /api/metrics`
    ///
    /// # Errors
    /// Same as [`PredictionApi::predict`].
    fn metrics(&self) -> Result<ModelMetrics, ApiError>;

    /// `GET /api/data-stats`
    ///
    /// # Errors
    /// Same as [`PredictionApi::predict`].
    fn data_stats(&self) -> Result<DataStats, ApiError>;

    /// `GET /api/health`
    ///
    /// # Errors
    /// Same as [`PredictionApi::predict`].
    fn health(&self) -> Result<HealthStatus, ApiError>;
}
