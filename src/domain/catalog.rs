//! Read-only backend metadata: model details, metrics, dataset statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET /api/model-info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub training_samples: u64,
    pub test_samples: u64,
    pub features: Vec<String>,
    /// Hyperparameters; values may be numbers, strings or null
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// `GET /api/metrics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Percent
    pub test_accuracy: f64,
    /// Percent
    pub train_accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// `[[true negative, false positive], [false negative, true positive]]`
    pub confusion_matrix: [[u64; 2]; 2],
}

impl ModelMetrics {
    #[must_use]
    pub fn true_negatives(&self) -> u64 {
        self.confusion_matrix[0][0]
    }

    #[must_use]
    pub fn false_positives(&self) -> u64 {
        self.confusion_matrix[0][1]
    }

    #[must_use]
    pub fn false_negatives(&self) -> u64 {
        self.confusion_matrix[1][0]
    }

    #[must_use]
    pub fn true_positives(&self) -> u64 {
        self.confusion_matrix[1][1]
    }
}

/// `GET /api/data-stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataStats {
    pub total_samples: u64,
    pub features: Vec<String>,
    #[serde(default)]
    pub feature_stats: FeatureStats,
    #[serde(default)]
    pub target_distribution: BTreeMap<String, u64>,
}

impl DataStats {
    /// Percentage of `count` over all samples, 0 when the dataset is empty.
    #[must_use]
    pub fn share_of_total(&self, count: u64) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        count as f64 / self.total_samples as f64 * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub avg_bmi: Option<f64>,
    #[serde(default)]
    pub gender_distribution: BTreeMap<String, u64>,
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
}

impl HealthStatus {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == "healthy" && self.model_loaded && self.scaler_loaded
    }
}

/// Plain-language meaning of each model input.
pub const FEATURE_DESCRIPTIONS: [(&str, &str); 12] = [
    ("gender", "Patient gender (1: Female, 2: Male)"),
    ("height", "Height in centimeters"),
    ("weight", "Weight in kilograms"),
    ("ap_hi", "Systolic blood pressure (mmHg)"),
    ("ap_lo", "Diastolic blood pressure (mmHg)"),
    (
        "cholesterol",
        "Cholesterol level (1: Normal, 2: Above normal, 3: Well above normal)",
    ),
    (
        "gluc",
        "Glucose level (1: Normal, 2: Above normal, 3: Well above normal)",
    ),
    ("smoke", "Smoking status (0: No, 1: Yes)"),
    ("alco", "Alcohol intake (0: No, 1: Yes)"),
    ("active", "Physical activity (0: No, 1: Yes)"),
    ("age_years", "Age in years"),
    ("BMI", "Body Mass Index (calculated from height and weight)"),
];

/// `"min_samples_leaf"` -> `"Min Samples Leaf"`
#[must_use]
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display form of a hyperparameter value; null reads as `None`.
#[must_use]
pub fn format_parameter(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "None".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
