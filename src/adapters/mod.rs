//! Adapters layer: Concrete implementations of ports.
//!
//! - `http`: reqwest client for the prediction backend
//! - `sanitize`: health-data and secret filtering for logs

pub mod http;
pub mod sanitize;

pub use http::HttpPredictionApi;
