//! Prediction request pipeline
//!
//! ```text
//! raw JSON → normalize → validate → vectorize → scale → infer → risk band → result
//!                           │            │
//!                           └── 400 ─────┘
//! ```
//!
//! Stateless per request: the only shared inputs are the read-only artifacts
//! held by [`ServiceContext`].

pub mod normalize;
pub mod validate;
pub mod vectorize;

use serde_json::{Map, Value};

use crate::context::ServiceContext;
use crate::error::{AppError, AppResult};
use crate::response::PredictionResult;

pub use normalize::normalize;
pub use validate::{validate, ValidationReport};
pub use vectorize::FeatureVector;

/// Numeric coercion shared by validation and vectorization.
///
/// Accepts JSON numbers and numeric strings; everything else is rejected.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn predict(ctx: &ServiceContext, raw: Map<String, Value>) -> AppResult<PredictionResult> {
    let (Some(model), Some(scaler)) = (ctx.model(), ctx.scaler()) else {
        return Err(AppError::ArtifactUnavailable);
    };

    let record = normalize(raw);

    let report = validate(&record);
    if !report.is_valid() {
        tracing::debug!(errors = ?report.errors, "Rejected prediction request");
        return Err(AppError::Validation(report.errors));
    }

    let features = FeatureVector::from_record(&record)?;
    tracing::info!(
        glucose = ?features.get("Glucose"),
        bmi = ?features.get("BMI"),
        age = ?features.get("Age"),
        "Prediction request"
    );

    let scaled = scaler.transform(&features);
    let output = model.predict_with_probability(&scaled);

    if !output.probability.is_finite() || !(0.0..=1.0).contains(&output.probability) {
        return Err(AppError::internal(format!(
            "model returned invalid probability {}",
            output.probability
        )));
    }

    let risk_level = ctx.risk_scheme().classify(output.probability);

    tracing::info!(
        "Prediction: {} | Probability: {:.3} | Risk: {}",
        output.label,
        output.probability,
        risk_level
    );

    Ok(PredictionResult::new(
        output,
        risk_level,
        ctx.metadata().model_name.clone(),
        ctx.model_version(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&json!(3)), Some(3.0));
        assert_eq!(coerce_f64(&json!(0.25)), Some(0.25));
        assert_eq!(coerce_f64(&json!(" 42 ")), Some(42.0));
        assert_eq!(coerce_f64(&json!("4x")), None);
        assert_eq!(coerce_f64(&json!(true)), None);
        assert_eq!(coerce_f64(&Value::Null), None);
        assert_eq!(coerce_f64(&json!({"v": 1})), None);
    }
}
