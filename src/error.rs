//! Application error type and its HTTP mapping.

use axum::Json;
use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the message endpoints.
#[derive(Error, Debug)]
pub enum AppError {
    /// The submitted message is empty after trimming.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The request body could not be understood.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request body is larger than the configured limit.
    #[error("request body exceeds the {0} byte limit")]
    PayloadTooLarge(usize),

    /// The LLM chain failed.
    #[error("assistant unavailable: {0:#}")]
    Upstream(#[from] anyhow::Error),

    /// The request did not finish within the configured timeout.
    #[error("assistant timed out after {0}s")]
    Timeout(u64),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmptyMessage | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Map an extractor rejection, keeping the body limit apart from other
    /// malformed input.
    pub fn from_rejection(status: StatusCode, detail: String, body_limit: usize) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(body_limit)
        } else {
            Self::InvalidBody(detail)
        }
    }

    /// Map a raw body rejection.
    pub fn from_bytes_rejection(rejection: &BytesRejection, body_limit: usize) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text(), body_limit)
    }

    /// Map a form body rejection.
    pub fn from_form_rejection(rejection: &FormRejection, body_limit: usize) -> Self {
        Self::from_rejection(rejection.status(), rejection.body_text(), body_limit)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
