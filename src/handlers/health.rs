//! Health check handler

use axum::{extract::State, http::StatusCode};
use serde::Serialize;

use crate::response::{timestamp, ApiResponse};
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    model_loaded: bool,
    scaler_loaded: bool,
    timestamp: String,
    version: &'static str,
}

pub async fn check(State(state): State<AppState>) -> (StatusCode, ApiResponse<HealthResponse>) {
    let ctx = &state.context;
    let healthy = ctx.is_ready();

    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        service: "Diabetes Prediction ML Service",
        model_loaded: ctx.model_loaded(),
        scaler_loaded: ctx.scaler_loaded(),
        timestamp: timestamp(),
        version: env!("CARGO_PKG_VERSION"),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, ApiResponse::new(healthy, body))
}
