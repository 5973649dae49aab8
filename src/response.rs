//! Response envelopes and the prediction result shape

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::model::ClassOutput;
use crate::risk::RiskLevel;

/// ISO-8601 wall clock time of response construction
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `{success, data, message?, timestamp}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::new(true, data)
    }

    pub fn new(success: bool, data: T) -> Self {
        Self {
            success,
            data: Some(data),
            message: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{success: false, error, details?, timestamp}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }
}

/// Both class probabilities, keyed for the frontend
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassProbabilities {
    pub no_diabetes: f64,
    pub diabetes: f64,
}

/// `data` payload of a successful `/predict`
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub prediction_label: &'static str,
    /// Same as `probability_diabetes`; kept for older clients
    pub probability: f64,
    pub probability_diabetes: f64,
    pub probability_no_diabetes: f64,
    pub probabilities: ClassProbabilities,
    /// Max class probability as a percentage, two decimals
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub model_used: String,
    pub model_version: String,
    pub timestamp: String,
}

impl PredictionResult {
    pub fn new(
        output: ClassOutput,
        risk_level: RiskLevel,
        model_used: impl Into<String>,
        model_version: impl Into<String>,
    ) -> Self {
        let diabetes = output.probability;
        let no_diabetes = 1.0 - diabetes;

        Self {
            prediction: output.label,
            prediction_label: if output.label == 1 { "Diabetic" } else { "Non-Diabetic" },
            probability: diabetes,
            probability_diabetes: diabetes,
            probability_no_diabetes: no_diabetes,
            probabilities: ClassProbabilities { no_diabetes, diabetes },
            confidence: round2(diabetes.max(no_diabetes) * 100.0),
            risk_level,
            model_used: model_used.into(),
            model_version: model_version.into(),
            timestamp: timestamp(),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
