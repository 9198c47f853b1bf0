/// Axum handlers for the two relayed API calls
use crate::AppState;
use crate::client::HttpClient;
use crate::errors::RelayError;
use crate::models::{ChatRequest, UpstreamChatRequest};
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use tracing::{debug, error, info, instrument};

/// Content type declared on the relayed chat stream.
pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// `GET /api/tags`: ask upstream for its model list and hand the answer back.
///
/// Upstream's response goes to the caller verbatim, error statuses included.
/// Only a connection-level failure is translated, into a 500.
#[instrument(skip(state))]
pub async fn tags<T: HttpClient>(State(state): State<AppState<T>>) -> Result<Response, RelayError> {
    let req = Request::builder()
        .method(Method::GET)
        .uri(state.endpoint("tags"))
        .body(Body::empty())
        .map_err(|e| RelayError::Internal(e.to_string()))?;

    match state.http_client.request(req).await {
        Ok(response) => Ok(response),
        Err(e) => {
            error!("tag listing request to upstream failed: {e}");
            Err(RelayError::Upstream(e.to_string()))
        }
    }
}

/// `POST /api/chat`: forward the chat request with `stream: true` and relay
/// the ndjson response body chunk-for-chunk as it arrives.
#[instrument(skip(state, body))]
pub async fn chat<T: HttpClient>(
    State(state): State<AppState<T>>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let chat: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| RelayError::BadRequest(e.to_string()))?;
    info!("relaying chat for model: {}", chat.model);

    let payload = UpstreamChatRequest::from(chat);
    let payload = serde_json::to_vec(&payload).map_err(|e| RelayError::Internal(e.to_string()))?;

    let req = Request::builder()
        .method(Method::POST)
        .uri(state.endpoint("chat"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .map_err(|e| RelayError::Internal(e.to_string()))?;

    let upstream = state.http_client.request(req).await.map_err(|e| {
        error!("chat request to upstream failed: {e}");
        RelayError::Upstream(e.to_string())
    })?;

    if !upstream.status().is_success() {
        debug!("upstream rejected chat request: {}", upstream.status());
        return Err(RelayError::UpstreamStatus(upstream.status()));
    }

    // The caller's status code is decided here and nowhere else. From this
    // point the upstream body streams straight through; if upstream dies
    // mid-generation the body truncates, with no further status signalling.
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
        .body(upstream.into_body())
        .map_err(|e| RelayError::Internal(e.to_string()))
}
