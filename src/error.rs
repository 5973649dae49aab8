//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::response::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    // Request errors
    #[error("No data provided in request")]
    NoData,

    #[error("{0}")]
    InvalidBody(String),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{feature} value {value} cannot be converted to a number")]
    TypeConversion { feature: String, value: String },

    // Service errors
    #[error("Model not loaded properly")]
    ArtifactUnavailable,

    // Routing errors
    #[error("Endpoint not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    // Generic errors
    #[error("Internal server error: {detail}")]
    Internal { detail: String, expose: bool },
}

impl AppError {
    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal {
            detail: detail.into(),
            expose: false,
        }
    }

    /// Let internal error details through to the caller (debug mode)
    pub fn exposed(self, debug: bool) -> Self {
        match self {
            AppError::Internal { detail, .. } => AppError::Internal { detail, expose: debug },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoData
            | AppError::InvalidBody(_)
            | AppError::Validation(_)
            | AppError::TypeConversion { .. } => StatusCode::BAD_REQUEST,
            AppError::ArtifactUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let details = match &self {
            AppError::Validation(errors) => Some(json!({ "errors": errors })),
            AppError::NotFound => Some(json!({
                "available_endpoints": {
                    "home": "/",
                    "health": "/health",
                    "info": "/info",
                    "predict": "/predict"
                }
            })),
            AppError::MethodNotAllowed => Some(json!({
                "allowed_methods": ["GET", "POST", "OPTIONS"]
            })),
            AppError::Internal { detail, expose } => {
                tracing::error!("Internal error: {}", detail);
                expose.then(|| json!(detail))
            }
            _ => None,
        };

        let message = match &self {
            AppError::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse::new(message).with_details(details));

        (status, body).into_response()
    }
}
