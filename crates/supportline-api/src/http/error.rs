//! Application error type for the relay endpoint.
//!
//! Every failure is logged with its cause and collapses to the same
//! `500 Internal Server Error` plain-text response; callers cannot tell
//! validation problems from upstream ones.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use supportline_types::error::RelayError;

#[derive(Debug)]
pub enum AppError {
    /// Request body is not a JSON array of turns.
    MalformedBody(serde_json::Error),
    /// Validation or upstream failure before streaming started.
    Relay(RelayError),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MalformedBody(e) => {
                tracing::error!(error = %e, "error processing the request: malformed body");
            }
            AppError::Relay(e) => {
                tracing::error!(error = %e, "error processing the request");
            }
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Internal Server Error",
        )
            .into_response()
    }
}
