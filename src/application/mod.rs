//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the prediction flow and the informational screens.

mod controller;
mod insights;

pub use controller::{PredictionController, Submission};
pub use insights::{InsightsService, ModelOverview};
