//! HTTP adapter: Implementation of `PredictionApi` over reqwest.
//!
//! Uses the blocking client; callers that must stay responsive run it on a
//! worker thread (see `tui::PredictionWorker`).
//!
//! Error bodies follow the FastAPI convention `{"detail": ...}` where
//! `detail` is either a message string or a list of validation entries.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::domain::{
    DataStats, HealthStatus, ModelInfo, ModelMetrics, PredictionRequest, PredictionResult,
};
use crate::ports::{ApiError, PredictionApi};

const PREDICT_PATH: &str = "/api/predict";
const MODEL_INFO_PATH: &str = "/api/model-info";
const METRICS_PATH: &str = "/api/metrics";
const DATA_STATS_PATH: &str = "/api/data-stats";
const HEALTH_PATH: &str = "/api/health";

/// reqwest-backed prediction API client.
pub struct HttpPredictionApi {
    client: Client,
    config: ClientConfig,
}

impl HttpPredictionApi {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().map_err(transport_error)?;
        decode_response(path, response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .map_err(transport_error)?;
        decode_response(path, response)
    }
}

impl PredictionApi for HttpPredictionApi {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
        self.post_json(PREDICT_PATH, request)
    }

    fn model_info(&self) -> Result<ModelInfo, ApiError> {
        self.get_json(MODEL_INFO_PATH)
    }

    fn metrics(&self) -> Result<ModelMetrics, ApiError> {
        self.get_json(METRICS_PATH)
    }

    fn data_stats(&self) -> Result<DataStats, ApiError> {
        self.get_json(DATA_STATS_PATH)
    }

    fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json(HEALTH_PATH)
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Transport(format!("request timed out: {err}"))
    } else {
        ApiError::Transport(err.to_string())
    }
}

fn decode_response<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().map_err(transport_error)?;
    tracing::debug!(path, status = status.as_u16(), bytes = body.len(), "backend responded");

    if !status.is_success() {
        let detail = extract_detail(&body);
        tracing::warn!(path, status = status.as_u16(), has_detail = detail.is_some(), "backend error");
        return Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull a user-facing message out of an error body.
///
/// A string `detail` is returned verbatim; a list of validation entries is
/// reduced to their `msg` fields joined with `"; "`. Empty details count as
/// absent.
fn extract_detail(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    let detail = match parsed.get("detail")? {
        Value::String(s) => s.clone(),
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                other => other.get("msg").and_then(Value::as_str).map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => return None,
        other => other.to_string(),
    };

    (!detail.is_empty()).then_some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            extract_detail(r#"{"detail":"Invalid input"}"#).as_deref(),
            Some("Invalid input")
        );
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail":[
            {"loc":["body","ap_hi"],"msg":"Input should be less than or equal to 200","type":"less_than_equal"},
            {"loc":["body","BMI"],"msg":"Input should be a valid number","type":"float_type"}
        ]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Input should be less than or equal to 200; Input should be a valid number")
        );
    }

    #[test]
    fn test_detail_absent_or_empty() {
        assert_eq!(extract_detail(""), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"error":"x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail":""}"#), None);
        assert_eq!(extract_detail(r#"{"detail":null}"#), None);
        assert_eq!(extract_detail(r#"{"detail":[]}"#), None);
    }

    #[test]
    fn test_detail_other_json() {
        assert_eq!(extract_detail(r#"{"detail":{"code":7}}"#).as_deref(), Some(r#"{"code":7}"#));
    }
}
