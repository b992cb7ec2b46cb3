//! Wire-facing error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Errors surfaced by the speech pipeline.
///
/// Only two shapes ever cross the wire; upstream LLM and search failures
/// degrade to canned text inside the pipeline and never reach this type.
/// Internal detail stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The caller supplied a thread id this process never issued.
    #[error("invalid thread ID: {0}")]
    UnknownThread(String),
    /// Storage or other unexpected failure inside the pipeline.
    #[error("speech processing failed: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnknownThread(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The client-facing error string. Fixed per class, never carries
    /// internal detail.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::UnknownThread(_) => "Invalid thread ID.",
            Self::Internal(_) => "An error occurred during speech processing.",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
