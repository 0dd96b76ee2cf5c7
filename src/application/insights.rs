//! Insights service: Read-only views over the backend's model and dataset.

use std::sync::Arc;
use std::thread;

use crate::domain::{DataStats, HealthStatus, ModelInfo, ModelMetrics};
use crate::ports::{ApiError, PredictionApi};

/// Model metadata and its evaluation metrics, loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOverview {
    pub info: ModelInfo,
    pub metrics: ModelMetrics,
}

/// Service for the informational screens.
pub struct InsightsService<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
}

impl<A> InsightsService<A>
where
    A: PredictionApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetch model info and metrics concurrently.
    ///
    /// # Errors
    /// Fails if either request fails; model info errors take precedence.
    pub fn model_overview(&self) -> Result<ModelOverview, ApiError> {
        let api = self.api.as_ref();
        let (info, metrics) = thread::scope(|scope| {
            let metrics = scope.spawn(|| api.metrics());
            let info = api.model_info();
            let metrics = metrics
                .join()
                .unwrap_or_else(|_| Err(ApiError::Transport("metrics request panicked".into())));
            (info, metrics)
        });

        let overview = ModelOverview {
            info: info?,
            metrics: metrics?,
        };
        tracing::info!(
            model_type = %overview.info.model_type,
            features = overview.info.features.len(),
            "Loaded model overview"
        );
        Ok(overview)
    }

    /// # Errors
    /// Returns error if the request fails.
    pub fn data_stats(&self) -> Result<DataStats, ApiError> {
        let stats = self.api.data_stats()?;
        tracing::info!(total_samples = stats.total_samples, "Loaded dataset statistics");
        Ok(stats)
    }

    /// # Errors
    /// Returns error if the backend is unreachable or unhealthy at HTTP level.
    pub fn health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health()
    }
}
