//! Prediction controller: Owns the form and drives one submission at a time.
//!
//! Submission is split in two so the network call can happen elsewhere:
//! - `begin_submit` moves to `Pending` and assembles the request
//! - `complete` applies the outcome for that submission
//!
//! Every `begin_submit` bumps a generation counter. An outcome tagged with an
//! older generation is discarded, so a slow response can never overwrite the
//! state of a newer submission.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{FormField, FormState, PredictionRequest, PredictionResult, RequestState};
use crate::ports::{ApiError, PredictionApi};

/// A request ready to send, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub generation: u64,
    pub request: PredictionRequest,
}

/// Form state plus request lifecycle for the prediction flow.
pub struct PredictionController<A>
where
    A: PredictionApi,
{
    api: Arc<A>,
    form: FormState,
    state: RequestState,
    generation: u64,
    completed_at: Option<DateTime<Utc>>,
}

impl<A> PredictionController<A>
where
    A: PredictionApi,
{
    /// Create a controller with an empty form.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            form: FormState::default(),
            state: RequestState::Idle,
            generation: 0,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// When the last submission reached a terminal state.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Set a field; height and weight re-derive BMI. Never fails.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.update_field(field, value);
    }

    pub fn load_sample(&mut self) {
        self.form.load_sample();
    }

    /// Wipe the form back to its initial selections.
    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    /// Start a submission.
    ///
    /// Moves to `Pending` immediately. Returns the request to send, or `None`
    /// if a field could not be coerced, in which case the state is already
    /// `Failed` and nothing must be sent.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        self.generation = self.generation.wrapping_add(1);
        self.state = RequestState::Pending;

        match self.form.to_request() {
            Ok(request) => {
                tracing::info!(generation = self.generation, "Submitting prediction request");
                Some(Submission {
                    generation: self.generation,
                    request,
                })
            }
            Err(e) => {
                tracing::warn!(generation = self.generation, field = %e.field(), "Rejected form before sending");
                self.finish(RequestState::Failed(e.to_string()));
                None
            }
        }
    }

    /// Apply the outcome of a submission.
    ///
    /// Returns `false` (and changes nothing) when the outcome belongs to an
    /// older submission or no submission is pending.
    pub fn complete(&mut self, generation: u64, outcome: Result<PredictionResult, ApiError>) -> bool {
        if generation != self.generation || !self.state.is_pending() {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale prediction outcome"
            );
            return false;
        }

        let next = match outcome {
            Ok(result) => {
                tracing::info!(generation, risk_level = %result.risk_level, "Prediction received");
                RequestState::Success(result)
            }
            Err(e) => {
                tracing::warn!(generation, error = %e, "Prediction failed");
                RequestState::Failed(e.user_message())
            }
        };
        self.finish(next);
        true
    }

    /// Blocking submit: begin, call the backend once, complete.
    pub fn submit(&mut self) -> &RequestState {
        if let Some(submission) = self.begin_submit() {
            let outcome = self.api.predict(&submission.request);
            self.complete(submission.generation, outcome);
        }
        &self.state
    }

    fn finish(&mut self, state: RequestState) {
        self.state = state;
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DataStats, HealthStatus, ModelInfo, ModelMetrics, FALLBACK_ERROR_MESSAGE,
    };
    use std::sync::Mutex;

    /// In-process backend that records requests and replays a fixed outcome.
    struct FakeApi {
        outcome: Result<PredictionResult, ApiError>,
        requests: Mutex<Vec<PredictionRequest>>,
    }

    impl FakeApi {
        fn replying(outcome: Result<PredictionResult, ApiError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> Vec<PredictionRequest> {
            self.requests.lock().expect("requests lock").clone()
        }
    }

    impl PredictionApi for FakeApi {
        fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, ApiError> {
            self.requests.lock().expect("requests lock").push(request.clone());
            self.outcome.clone()
        }

        fn model_info(&self) -> Result<ModelInfo, ApiError> {
            Err(ApiError::Transport("unused".into()))
        }

        fn metrics(&self) -> Result<ModelMetrics, ApiError> {
            Err(ApiError::Transport("unused".into()))
        }

        fn data_stats(&self) -> Result<DataStats, ApiError> {
            Err(ApiError::Transport("unused".into()))
        }

        fn health(&self) -> Result<HealthStatus, ApiError> {
            Err(ApiError::Transport("unused".into()))
        }
    }

    fn low_risk() -> PredictionResult {
        PredictionResult {
            risk_level: "Low Risk".into(),
            probability: 12.5,
            message: "Low probability of cardiovascular disease.".into(),
            prediction: None,
        }
    }

    fn fill(controller: &mut PredictionController<FakeApi>) {
        controller.update_field(FormField::Gender, "2");
        controller.update_field(FormField::AgeYears, "50");
        controller.update_field(FormField::Height, "168");
        controller.update_field(FormField::Weight, "70");
        controller.update_field(FormField::ApHi, "120");
        controller.update_field(FormField::ApLo, "80");
    }

    #[test]
    fn test_starts_idle() {
        let controller = PredictionController::new(FakeApi::replying(Ok(low_risk())));
        assert_eq!(controller.state(), &RequestState::Idle);
        assert!(controller.completed_at().is_none());
    }

    #[test]
    fn test_submit_sends_exactly_one_typed_request() {
        let api = FakeApi::replying(Ok(low_risk()));
        let mut controller = PredictionController::new(api.clone());
        fill(&mut controller);

        controller.submit();

        let sent = api.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].gender, 2);
        assert_eq!(sent[0].height, 168);
        assert_eq!(sent[0].ap_hi, 120);
        assert!((sent[0].bmi - 24.80).abs() < 1e-9);
    }

    #[test]
    fn test_success_keeps_result_verbatim() {
        let mut controller = PredictionController::new(FakeApi::replying(Ok(low_risk())));
        fill(&mut controller);

        let state = controller.submit().clone();
        assert_eq!(state, RequestState::Success(low_risk()));
        assert!(controller.completed_at().is_some());
    }

    #[test]
    fn test_transport_failure_uses_fallback() {
        let api = FakeApi::replying(Err(ApiError::Transport("connection refused".into())));
        let mut controller = PredictionController::new(api);
        fill(&mut controller);

        controller.submit();
        assert_eq!(controller.state().error(), Some(FALLBACK_ERROR_MESSAGE));
    }

    #[test]
    fn test_server_detail_is_surfaced() {
        let api = FakeApi::replying(Err(ApiError::Server {
            status: 422,
            detail: Some("Invalid input".into()),
        }));
        let mut controller = PredictionController::new(api);
        fill(&mut controller);

        controller.submit();
        assert_eq!(controller.state(), &RequestState::Failed("Invalid input".into()));
    }

    #[test]
    fn test_unparsable_field_fails_without_request() {
        let api = FakeApi::replying(Ok(low_risk()));
        let mut controller = PredictionController::new(api.clone());
        fill(&mut controller);
        controller.update_field(FormField::ApHi, "abc");

        assert!(controller.begin_submit().is_none());
        assert!(api.sent().is_empty());
        let message = controller.state().error().expect("failed state");
        assert!(message.contains("Systolic BP"));
    }

    #[test]
    fn test_begin_submit_is_pending_until_complete() {
        let mut controller = PredictionController::new(FakeApi::replying(Ok(low_risk())));
        fill(&mut controller);
        controller.submit();

        let submission = controller.begin_submit().expect("valid form");
        assert!(controller.is_pending());
        assert!(controller.state().result().is_none());

        assert!(controller.complete(submission.generation, Ok(low_risk())));
        assert!(!controller.is_pending());
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut controller = PredictionController::new(FakeApi::replying(Ok(low_risk())));
        fill(&mut controller);

        let first = controller.begin_submit().expect("first");
        let second = controller.begin_submit().expect("second");
        assert!(second.generation > first.generation);

        assert!(!controller.complete(first.generation, Ok(low_risk())));
        assert!(controller.is_pending());

        let failure = Err(ApiError::Server {
            status: 500,
            detail: Some("Prediction error: boom".into()),
        });
        assert!(controller.complete(second.generation, failure));
        assert_eq!(controller.state().error(), Some("Prediction error: boom"));

        // A late duplicate for the current generation is ignored too.
        assert!(!controller.complete(second.generation, Ok(low_risk())));
        assert!(controller.state().error().is_some());
    }

    #[test]
    fn test_form_stays_usable_after_error() {
        let api = FakeApi::replying(Err(ApiError::Transport("down".into())));
        let mut controller = PredictionController::new(api.clone());
        fill(&mut controller);
        controller.submit();
        controller.submit();

        assert_eq!(api.sent().len(), 2);
        assert_eq!(controller.form().get(FormField::Height), "168");
    }

    #[test]
    fn test_reset_form() {
        let mut controller = PredictionController::new(FakeApi::replying(Ok(low_risk())));
        controller.load_sample();
        assert_eq!(controller.form().get(FormField::Bmi), "21.97");
        controller.reset_form();
        assert_eq!(controller.form().get(FormField::Bmi), "");
    }
}
