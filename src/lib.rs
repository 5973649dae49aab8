//! Diabetes Prediction ML Service
//!
//! HTTP inference API over a pre-trained binary classifier (Pima Indians
//! feature set).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     ML SERVICE (Axum)                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  GET /  GET /health  GET /info           POST /predict       │
//! │        │                                       │             │
//! │        │          ┌────────────────────────────▼───────────┐ │
//! │        │          │ normalize → validate → vectorize       │ │
//! │        │          │   → scale → classify → risk band       │ │
//! │        │          └────────────────────────────┬───────────┘ │
//! │        └──────────────┐                        │             │
//! │                ┌──────▼────────────────────────▼──────┐      │
//! │                │  ServiceContext (read-only, Arc)     │      │
//! │                │  model · scaler · metadata           │      │
//! │                └──────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod model;
pub mod pipeline;
pub mod response;
pub mod risk;
pub mod schema;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

pub use error::{AppError, AppResult};

use config::Config;
use context::ServiceContext;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ServiceContext>,
    pub config: Config,
}

impl AppState {
    pub fn new(context: ServiceContext, config: Config) -> Self {
        Self {
            context: Arc::new(context),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    use handlers::fallback::method_not_allowed;

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::home::index).fallback(method_not_allowed))
        .route("/health", get(handlers::health::check).fallback(method_not_allowed))
        .route("/info", get(handlers::info::get).fallback(method_not_allowed))
        .route("/predict", post(handlers::predict::predict).fallback(method_not_allowed))
        .fallback(handlers::fallback::not_found)
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(cors)
        .with_state(state)
}

#[derive(Clone, Copy, Default)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.cors_origins();

    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(3600));

    // credentials cannot be combined with a wildcard origin
    if origins.iter().any(|o| o == "*") {
        base.allow_origin(AllowOrigin::any())
    } else {
        let list: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Skipping invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        base.allow_origin(AllowOrigin::list(list)).allow_credentials(true)
    }
}
