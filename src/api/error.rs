//! API error responses
//!
//! Maps orchestrator errors to `{"detail": ...}` bodies: 400 for bad input,
//! 500 for everything else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use samurai_core::Error;
use samurai_llm::util::sanitize_error_for_user;
use serde_json::json;
use tracing::error;

/// Error returned by API handlers
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::InvalidInput(message) => (StatusCode::BAD_REQUEST, message.clone()),
            other => {
                error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    sanitize_error_for_user(&other.to_string()),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
