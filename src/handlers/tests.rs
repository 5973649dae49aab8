//! Integration tests for the HTTP surface
//!
//! Each test drives the real router with `oneshot`, so layers, fallbacks and
//! error envelopes are exercised the same way a client would see them.

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::{ClassOutput, Classifier, ModelArtifact, ModelMetadata, StandardScaler};
use crate::pipeline::FeatureVector;
use crate::risk::RiskScheme;
use crate::schema::FEATURE_NAMES;
use crate::{create_router, AppState};

const VERSION: &str = "test_v1";

/// Always answers with the same probability
#[derive(Debug)]
struct Fixed(f64);

impl Classifier for Fixed {
    fn kind(&self) -> &'static str {
        "fixed"
    }

    fn calibrated(&self) -> bool {
        true
    }

    fn predict_with_probability(&self, _input: &FeatureVector) -> ClassOutput {
        ClassOutput {
            label: u8::from(self.0 > 0.5),
            probability: self.0,
        }
    }
}

fn logistic() -> Box<dyn Classifier> {
    ModelArtifact::LogisticRegression {
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        coefficients: vec![0.39, 1.12, -0.16, 0.05, -0.11, 0.70, 0.29, 0.37],
        intercept: -0.86,
    }
    .into_classifier()
    .unwrap()
}

fn scaler() -> StandardScaler {
    StandardScaler::new(
        [3.8, 121.7, 72.4, 29.1, 140.7, 32.5, 0.47, 33.2],
        [3.4, 30.4, 12.1, 8.8, 86.3, 6.9, 0.33, 11.8],
    )
}

fn app_with(model: Option<Box<dyn Classifier>>, scheme: RiskScheme, debug: bool) -> Router {
    let has_scaler = model.is_some();
    let context = ServiceContext::from_parts(
        model,
        has_scaler.then(scaler),
        ModelMetadata::fallback(VERSION),
        VERSION,
        scheme,
    );
    let config = Config {
        debug,
        risk_scheme: scheme,
        ..Config::default()
    };
    create_router(AppState::new(context, config))
}

fn ready_app() -> Router {
    app_with(Some(logistic()), RiskScheme::ThreeBand, false)
}

fn unloaded_app() -> Router {
    app_with(None, RiskScheme::ThreeBand, false)
}

fn sample_body() -> Value {
    json!({
        "pregnancies": 2,
        "glucose": 120,
        "blood_pressure": 70,
        "skin_thickness": 20,
        "insulin": 100,
        "bmi": 25.5,
        "diabetes_pedigree_function": 0.5,
        "age": 30
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = tokio_test::assert_ok!(app.oneshot(request).await);
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================================
// POST /predict
// ============================================================================

#[tokio::test]
async fn test_predict_valid_snake_case_request() {
    let (status, body) = send(ready_app(), post_json("/predict", &sample_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Prediction completed successfully");
    assert!(body["timestamp"].is_string());

    let data = &body["data"];
    let prediction = data["prediction"].as_u64().unwrap();
    assert!(prediction == 0 || prediction == 1);

    let p = data["probability_diabetes"].as_f64().unwrap();
    let q = data["probability_no_diabetes"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert!((p + q - 1.0).abs() < 1e-12);
    assert!(["Low", "Medium", "High"].contains(&data["risk_level"].as_str().unwrap()));
    assert_eq!(data["model_version"], VERSION);
    assert!(data["timestamp"].is_string());
}

#[tokio::test]
async fn test_predict_camel_case_matches_snake_case() {
    let camel = json!({
        "pregnancies": 2,
        "glucose": 120,
        "bloodPressure": 70,
        "skinThickness": 20,
        "insulin": 100,
        "bmi": 25.5,
        "diabetesPedigreeFunction": 0.5,
        "age": 30
    });

    let (_, snake) = send(ready_app(), post_json("/predict", &sample_body())).await;
    let (status, camel) = send(ready_app(), post_json("/predict", &camel)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        camel["data"]["probability_diabetes"],
        snake["data"]["probability_diabetes"]
    );
}

#[tokio::test]
async fn test_predict_age_below_minimum() {
    let mut body = sample_body();
    body["age"] = json!(10);

    let (status, body) = send(ready_app(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());

    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Age"), "{}", error);
    assert!(error.contains("18"), "{}", error);
    assert_eq!(
        body["details"]["errors"],
        json!(["Age value 10 is out of range [18, 120]"])
    );
}

#[tokio::test]
async fn test_predict_missing_glucose() {
    let mut body = sample_body();
    body.as_object_mut().unwrap().remove("glucose");

    let (status, body) = send(ready_app(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Missing"), "{}", error);
    assert!(error.contains("Glucose"), "{}", error);
}

#[tokio::test]
async fn test_predict_unknown_field() {
    let mut body = sample_body();
    body["height_cm"] = json!(172);

    let (status, body) = send(ready_app(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["errors"], json!(["Unknown features: height_cm"]));
}

#[tokio::test]
async fn test_predict_non_numeric_value() {
    let mut body = sample_body();
    body["bmi"] = json!("twenty five");

    let (status, body) = send(ready_app(), post_json("/predict", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("BMI value"), "{}", error);
}

#[tokio::test]
async fn test_predict_numeric_strings_accepted() {
    let mut body = sample_body();
    body["glucose"] = json!("120");

    let (status, _) = send(ready_app(), post_json("/predict", &body)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_predict_empty_and_invalid_bodies() {
    let (status, body) = send(ready_app(), post_json("/predict", &json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided in request");

    let (status, body) = send(ready_app(), post_json("/predict", &json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body must be a JSON object");

    let garbage = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(ready_app(), garbage).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_predict_without_artifacts() {
    let (status, body) = send(unloaded_app(), post_json("/predict", &sample_body())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Model not loaded properly");
}

#[tokio::test]
async fn test_predict_uses_configured_risk_scheme() {
    let app = app_with(Some(Box::new(Fixed(0.85))), RiskScheme::FourBand, false);
    let (_, body) = send(app, post_json("/predict", &sample_body())).await;
    assert_eq!(body["data"]["risk_level"], "Very High");
    assert_eq!(body["data"]["prediction_label"], "Diabetic");
    assert_eq!(body["data"]["confidence"], json!(85.0));

    let app = app_with(Some(Box::new(Fixed(0.85))), RiskScheme::ThreeBand, false);
    let (_, body) = send(app, post_json("/predict", &sample_body())).await;
    assert_eq!(body["data"]["risk_level"], "High");
}

#[tokio::test]
async fn test_predict_internal_error_hides_detail() {
    let app = app_with(Some(Box::new(Fixed(f64::NAN))), RiskScheme::ThreeBand, false);
    let (status, body) = send(app, post_json("/predict", &sample_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_predict_internal_error_detail_in_debug() {
    let app = app_with(Some(Box::new(Fixed(1.5))), RiskScheme::ThreeBand, true);
    let (status, body) = send(app, post_json("/predict", &sample_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("invalid probability"));
}

#[tokio::test]
async fn test_predict_response_has_request_id() {
    let response = ready_app()
        .oneshot(post_json("/predict", &sample_body()))
        .await
        .unwrap();
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok(), "{}", id);
}

// ============================================================================
// GET /health, /info, /
// ============================================================================

#[tokio::test]
async fn test_health_when_loaded() {
    let (status, body) = send(ready_app(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["model_loaded"], true);
    assert_eq!(body["data"]["scaler_loaded"], true);
}

#[tokio::test]
async fn test_health_when_artifacts_missing() {
    let (status, body) = send(unloaded_app(), get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "unhealthy");
    assert_eq!(body["data"]["model_loaded"], false);
    assert_eq!(body["data"]["scaler_loaded"], false);
}

fn partially_loaded_app(
    model: Option<Box<dyn Classifier>>,
    scaler: Option<StandardScaler>,
) -> Router {
    let context = ServiceContext::from_parts(
        model,
        scaler,
        ModelMetadata::fallback(VERSION),
        VERSION,
        RiskScheme::ThreeBand,
    );
    create_router(AppState::new(context, Config::default()))
}

#[tokio::test]
async fn test_model_without_scaler_is_unhealthy() {
    let (status, body) = send(partially_loaded_app(Some(logistic()), None), get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["status"], "unhealthy");
    assert_eq!(body["data"]["model_loaded"], true);
    assert_eq!(body["data"]["scaler_loaded"], false);

    let app = partially_loaded_app(Some(logistic()), None);
    let (status, body) = send(app, post_json("/predict", &sample_body())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Model not loaded properly");
}

#[tokio::test]
async fn test_scaler_without_model_is_unhealthy() {
    let (status, body) = send(partially_loaded_app(None, Some(scaler())), get("/health")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["model_loaded"], false);
    assert_eq!(body["data"]["scaler_loaded"], true);

    let app = partially_loaded_app(None, Some(scaler()));
    let (status, _) = send(app, post_json("/predict", &sample_body())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_info_lists_schema() {
    let (status, body) = send(ready_app(), get("/info")).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["features"], json!(FEATURE_NAMES));
    assert_eq!(data["feature_ranges"]["Age"], json!([18.0, 120.0]));
    assert_eq!(data["model_info"]["version"], VERSION);
    assert_eq!(data["model_info"]["type"], "logistic_regression");
    assert_eq!(data["risk_scheme"]["name"], "three_band");
    assert_eq!(data["risk_scheme"]["bands"].as_array().unwrap().len(), 3);
    assert!(data["input_format"]["blood_pressure"].is_string());
}

#[tokio::test]
async fn test_home_reports_model() {
    let (status, body) = send(ready_app(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Diabetes Prediction ML API");
    assert_eq!(body["data"]["model"], "Logistic Regression");
    assert_eq!(body["data"]["model_version"], VERSION);
}

// ============================================================================
// Fallbacks
// ============================================================================

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let (status, body) = send(ready_app(), get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(body["details"]["available_endpoints"]["predict"], "/predict");
}

#[tokio::test]
async fn test_wrong_method_is_enveloped_405() {
    let (status, body) = send(ready_app(), get("/predict")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

// ============================================================================
// Bundled artifacts
// ============================================================================

#[tokio::test]
async fn test_bundled_artifacts_serve_predictions() {
    let config = Config {
        model_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models"),
        ..Config::default()
    };
    let context = ServiceContext::load(&config);
    let app = create_router(AppState::new(context, config));

    let (status, body) = send(app.clone(), post_json("/predict", &sample_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["model_version"], "20251023_210956");

    let (_, info) = send(app, get("/info")).await;
    assert!(info["data"]["artifact_digests"]["model_sha256"].is_string());
    assert_eq!(info["data"]["performance_metrics"]["roc_auc"], json!(0.8326));
}
