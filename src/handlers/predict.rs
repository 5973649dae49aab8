//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use crate::pipeline;
use crate::response::{ApiResponse, PredictionResult};
use crate::{AppError, AppResult, AppState};

/// Predict diabetes risk
///
/// Expected JSON body (any accepted key spelling):
///
/// ```json
/// {
///     "pregnancies": 2,
///     "glucose": 120,
///     "blood_pressure": 70,
///     "skin_thickness": 20,
///     "insulin": 100,
///     "bmi": 25.5,
///     "diabetes_pedigree_function": 0.5,
///     "age": 30
/// }
/// ```
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<ApiResponse<PredictionResult>> {
    // The readiness check comes before body parsing
    if !state.context.is_ready() {
        return Err(AppError::ArtifactUnavailable);
    }

    let raw = match body {
        Ok(Json(Value::Object(map))) if !map.is_empty() => map,
        Ok(Json(Value::Object(_))) | Ok(Json(Value::Null)) => return Err(AppError::NoData),
        Ok(Json(_)) => {
            return Err(AppError::InvalidBody(
                "Request body must be a JSON object".to_string(),
            ))
        }
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection);
            return Err(AppError::NoData);
        }
    };

    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let span = tracing::info_span!("predict", request_id = %request_id);
    let result = span
        .in_scope(|| pipeline::predict(&state.context, raw))
        .map_err(|e| e.exposed(state.config.debug))?;

    Ok(ApiResponse::ok(result).with_message("Prediction completed successfully"))
}
