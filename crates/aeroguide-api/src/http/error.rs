//! Application error type mapping to HTTP status codes.
//!
//! The browser client expects plain `{"error": "..."}` bodies. Upstream
//! details are logged server-side and replaced with a generic message so
//! provider error text never leaks to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use aeroguide_core::assistant::AssistantError;
use aeroguide_types::error::UpstreamError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The request itself is malformed.
    Validation(String),
    /// The requested thing does not exist.
    NotFound(String),
    /// An upstream dependency failed.
    Upstream(UpstreamError),
    /// Everything else.
    Internal(String),
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Upstream(err) => ApiError::Upstream(err),
            AssistantError::Session(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Upstream(err) => {
                tracing::error!(error = %err, "upstream dependency failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The assistant is temporarily unavailable, please try again.".to_string(),
                )
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
