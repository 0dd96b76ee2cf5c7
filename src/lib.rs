//! # CardioGuard
//!
//! Terminal client for a cardiovascular disease risk prediction service.
//!
//! This crate provides:
//! - A prediction form with automatic BMI derivation
//! - Typed request assembly and a submission lifecycle
//! - Views over the backend's model metadata and dataset statistics
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Form state, wire types, lifecycle (no I/O)
//! - `ports`: Trait for the remote prediction backend
//! - `adapters`: reqwest client, log sanitization
//! - `application`: Prediction controller and insights service
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::ClientConfig;
pub use domain::{FormField, FormState, PredictionRequest, PredictionResult, RequestState, RiskLevel};

/// Result type for CardioGuard operations
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for CardioGuard
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("Invalid configuration: {0}")]
    Config(String),
}
