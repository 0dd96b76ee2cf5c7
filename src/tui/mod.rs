//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home with backend status
//! - Prediction form and result
//! - Model information and dataset insights
//! - Disclaimer

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::Theme;
pub use worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};
