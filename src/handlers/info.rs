//! Model and input schema details

use axum::extract::State;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::model::ArtifactDigests;
use crate::response::ApiResponse;
use crate::schema::{FEATURE_NAMES, FEATURE_RANGES, FEATURE_VERSION, INPUT_FORMAT};
use crate::AppState;

#[derive(Serialize)]
pub struct ModelInfo {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    version: String,
    training_date: String,
    calibrated: Option<bool>,
}

#[derive(Serialize)]
pub struct InfoResponse {
    model_info: ModelInfo,
    performance_metrics: Map<String, Value>,
    feature_version: u8,
    features: Vec<&'static str>,
    feature_ranges: Map<String, Value>,
    input_format: Map<String, Value>,
    risk_scheme: Value,
    artifact_digests: ArtifactDigests,
}

pub async fn get(State(state): State<AppState>) -> ApiResponse<InfoResponse> {
    let ctx = &state.context;
    let meta = ctx.metadata();
    let model = ctx.model();

    let kind = meta
        .model_type
        .clone()
        .or_else(|| model.map(|m| m.kind().to_string()))
        .unwrap_or_else(|| "Unknown".to_string());

    let feature_ranges = FEATURE_RANGES
        .iter()
        .map(|r| (r.name.to_string(), json!([r.min, r.max])))
        .collect();

    let input_format = INPUT_FORMAT
        .iter()
        .map(|(key, help)| (key.to_string(), json!(help)))
        .collect();

    let scheme = ctx.risk_scheme();
    let bands: Vec<Value> = scheme
        .thresholds()
        .into_iter()
        .map(|(level, lower)| json!({ "level": level, "min_probability": lower }))
        .collect();

    ApiResponse::ok(InfoResponse {
        model_info: ModelInfo {
            name: meta.model_name.clone(),
            kind,
            version: ctx.model_version().to_string(),
            training_date: meta.training_date.clone(),
            calibrated: model.map(|m| m.calibrated()),
        },
        performance_metrics: meta.performance_metrics.clone(),
        feature_version: FEATURE_VERSION,
        features: FEATURE_NAMES.to_vec(),
        feature_ranges,
        input_format,
        risk_scheme: json!({ "name": scheme.to_string(), "bands": bands }),
        artifact_digests: ctx.digests().clone(),
    })
}
