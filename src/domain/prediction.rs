//! Prediction request and result types.
//!
//! Mirrors the JSON exchanged with `POST /api/predict`.

use serde::{Deserialize, Serialize};

/// Typed payload sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// 1 = female, 2 = male
    pub gender: i32,
    /// Height in centimeters
    pub height: i32,
    /// Weight in kilograms
    pub weight: f64,
    /// Systolic blood pressure (mmHg)
    pub ap_hi: i32,
    /// Diastolic blood pressure (mmHg)
    pub ap_lo: i32,
    /// 1 = normal, 2 = above normal, 3 = well above normal
    pub cholesterol: i32,
    /// Same scale as cholesterol
    pub gluc: i32,
    pub smoke: i32,
    pub alco: i32,
    pub active: i32,
    pub age_years: i32,
    #[serde(rename = "BMI")]
    pub bmi: f64,
}

/// Risk classification returned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Look up a level by its exact server label (`"Low Risk"` etc).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low Risk" => Some(Self::Low),
            "Moderate Risk" => Some(Self::Moderate),
            "High Risk" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
        }
    }

    /// Short marker shown next to the label in the terminal.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Low => "OK",
            Self::Moderate => "!",
            Self::High => "!!",
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),      // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk assessment as decoded from the backend, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Server label, one of `Low Risk`, `Moderate Risk`, `High Risk`
    pub risk_level: String,

    /// Disease probability as a percentage (0-100)
    pub probability: f64,

    /// Free-text explanation
    pub message: String,

    /// Binary class (0 = no disease, 1 = disease) when the server reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<u8>,
}

impl PredictionResult {
    /// Typed level, if the label is one of the known three.
    #[must_use]
    pub fn level(&self) -> Option<RiskLevel> {
        RiskLevel::from_label(&self.risk_level)
    }

    /// Probability clamped into `0.0..=1.0` for gauges.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.probability.is_finite() {
            (self.probability / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = PredictionRequest {
            gender: 2,
            height: 168,
            weight: 62.0,
            ap_hi: 110,
            ap_lo: 80,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
            age_years: 50,
            bmi: 21.97,
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["BMI"], json!(21.97));
        assert_eq!(value["gender"], json!(2));
        assert!(value["gender"].is_i64());
        assert!(value["weight"].is_f64());
        assert!(value.get("bmi").is_none());
        assert_eq!(value.as_object().map(|o| o.len()), Some(12));
    }

    #[test]
    fn test_result_decodes_server_body() {
        let body = json!({
            "prediction": 0,
            "probability": 12.5,
            "risk_level": "Low Risk",
            "message": "Low probability of cardiovascular disease. Maintain a healthy lifestyle!"
        });
        let result: PredictionResult = serde_json::from_value(body).expect("decode");
        assert_eq!(result.level(), Some(RiskLevel::Low));
        assert_eq!(result.prediction, Some(0));
        assert!((result.ratio() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_result_without_prediction_field() {
        let body = json!({"risk_level": "High Risk", "probability": 81.0, "message": "x"});
        let result: PredictionResult = serde_json::from_value(body).expect("decode");
        assert_eq!(result.prediction, None);
        assert_eq!(result.level(), Some(RiskLevel::High));
    }

    #[test]
    fn test_risk_label_is_exact_match() {
        assert_eq!(RiskLevel::from_label("Moderate Risk"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::from_label("moderate risk"), None);
        assert_eq!(RiskLevel::from_label("Low"), None);
        for level in [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High] {
            assert_eq!(RiskLevel::from_label(level.label()), Some(level));
        }
    }

    #[test]
    fn test_ratio_is_clamped() {
        let mut result = PredictionResult {
            risk_level: "High Risk".into(),
            probability: 140.0,
            message: String::new(),
            prediction: None,
        };
        assert!((result.ratio() - 1.0).abs() < f64::EPSILON);
        result.probability = -3.0;
        assert!(result.ratio().abs() < f64::EPSILON);
    }
}
