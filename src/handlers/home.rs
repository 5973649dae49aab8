//! Service metadata

use axum::extract::State;
use serde_json::{json, Value};

use crate::response::ApiResponse;
use crate::AppState;

pub async fn index(State(state): State<AppState>) -> ApiResponse<Value> {
    let ctx = &state.context;
    let status = if ctx.is_ready() { "running" } else { "degraded" };

    ApiResponse::ok(json!({
        "name": "Diabetes Prediction ML API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": status,
        "model": ctx.metadata().model_name,
        "model_version": ctx.model_version(),
        "endpoints": {
            "predict": "/predict [POST]",
            "health": "/health [GET]",
            "info": "/info [GET]"
        },
        "description": "ML API for diabetes risk prediction"
    }))
}
