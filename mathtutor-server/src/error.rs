//! Request-level error taxonomy. Every failure in a handler ends up here
//! and is rendered as a JSON `{error}` body with the matching status code;
//! nothing propagates past the handler boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required fields in the request body.
    #[error("{0}")]
    Validation(String),

    /// A required setting (the API key) is absent.
    #[error("{0}")]
    Configuration(String),

    /// Network-level failure talking to DashScope, including the request
    /// timeout.
    #[error("DashScope request failed: {0}")]
    Transport(String),

    /// DashScope answered with a non-success status. The raw body is kept
    /// for diagnosis.
    #[error("DashScope HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Anything else that went wrong while handling the request.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Configuration(_)
            | ApiError::Transport(_)
            | ApiError::Upstream { .. }
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
