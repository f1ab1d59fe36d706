use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::entities::EntityKind;

#[derive(Debug, Error)]
pub enum TrialDqiError {
    #[error("{kind} not found: {id}")]
    EntityNotFound { kind: EntityKind, id: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrialDqiError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        TrialDqiError::EntityNotFound { kind, id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, TrialDqiError>;

// ── HTTP mapping ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// Errors returned by JSON API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TrialDqiError> for ApiError {
    fn from(err: TrialDqiError) -> Self {
        match err {
            TrialDqiError::EntityNotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody { error: ErrorDetail { code, message } };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = TrialDqiError::not_found(EntityKind::Site, "SITE-999");
        assert_eq!(err.to_string(), "site not found: SITE-999");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let api: ApiError = TrialDqiError::not_found(EntityKind::Study, "X").into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_config_error_maps_to_500() {
        let api: ApiError = TrialDqiError::Config("bad".into()).into();
        assert!(matches!(api, ApiError::Internal(_)));
        assert_eq!(api.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
