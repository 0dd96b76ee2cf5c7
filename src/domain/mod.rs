//! Domain layer: form state, wire types and the submission lifecycle.
//!
//! Pure Rust types with no I/O. Everything that crosses the wire derives
//! serde; everything the user types stays text until submission.

mod catalog;
mod form;
mod lifecycle;
mod prediction;

pub use catalog::{
    format_parameter, humanize_key, DataStats, FeatureStats, HealthStatus, ModelInfo,
    ModelMetrics, FEATURE_DESCRIPTIONS,
};
pub use form::{
    compute_bmi, parse_leading_float, parse_leading_int, FieldIssue, FieldKind, FormError,
    FormField, FormState, UnknownField,
};
pub use lifecycle::{RequestState, FALLBACK_ERROR_MESSAGE};
pub use prediction::{PredictionRequest, PredictionResult, RiskLevel};
