//! Failure modes surfaced to the caller.
//!
//! Everything the relay can get wrong before a stream starts collapses to a
//! 500 with a `{"detail": "..."}` body. Upstream error statuses for the tags
//! endpoint are not represented here: those pass through verbatim and never
//! become a `RelayError`.
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Connection-level failure: upstream not listening, DNS, reset, etc.
    #[error("could not connect to upstream: {0}")]
    Upstream(String),

    /// Upstream answered the chat call with a non-success status before any
    /// bytes were relayed.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    /// The caller's request body was not valid JSON (or not a JSON object).
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// Building the upstream request failed. Only reachable with a broken
    /// upstream base URL, which argument parsing rules out at startup.
    #[error("internal relay error: {0}")]
    Internal(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}
