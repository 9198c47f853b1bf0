//! ollama-relay - a minimal streaming relay for a local Ollama instance
//!
//! The relay sits between a browser client and a locally running Ollama
//! server. It forwards `GET /api/tags` and `POST /api/chat` to the upstream
//! API, streams the chunked ndjson chat response back byte-for-byte, and
//! serves the single-page client from a static directory. A permissive CORS
//! layer can be attached to everything for local cross-origin use.

use axum::Router;
use axum::routing::{get, post};
use std::path::PathBuf;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, instrument};
use url::Url;

pub mod client;
pub mod errors;
pub mod handlers;
pub mod models;

use client::{HttpClient, HyperClient};
use handlers::{chat, tags};

/// Application state shared by the relay handlers.
///
/// Nothing here is mutable after startup: the upstream base URL and the
/// static directory are fixed for the lifetime of the process, and the HTTP
/// client is internally pooled.
#[derive(Clone, Debug)]
pub struct AppState<T: HttpClient> {
    pub http_client: T,
    pub upstream: Url,
    pub static_dir: PathBuf,
}

impl AppState<HyperClient> {
    /// Create a new AppState with the default Hyper client
    pub fn new(upstream: Url, static_dir: PathBuf) -> Self {
        let http_client = client::create_hyper_client();
        Self {
            http_client,
            upstream,
            static_dir,
        }
    }
}

impl<T: HttpClient> AppState<T> {
    /// Create a new AppState with a custom HTTP client (useful for testing)
    pub fn with_client(upstream: Url, static_dir: PathBuf, http_client: T) -> Self {
        Self {
            http_client,
            upstream,
            static_dir,
        }
    }

    /// Full URL for an upstream API endpoint, e.g. `endpoint("tags")` →
    /// `http://localhost:11434/api/tags`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.upstream.as_str().trim_end_matches('/'), name)
    }
}

/// Build the relay router.
///
/// Routes:
/// - `GET /api/tags` - upstream model list, passed through verbatim
/// - `POST /api/chat` - streaming chat relay
/// - `GET /static/{*path}` - files from the static directory (404 on missing)
/// - `GET /` - `index.html` from the static directory
#[instrument(skip(state))]
pub fn build_router<T: HttpClient + Clone + Send + Sync + 'static>(state: AppState<T>) -> Router {
    info!("Building router");
    let static_dir = state.static_dir.clone();
    Router::new()
        .route("/api/tags", get(tags))
        .route("/api/chat", post(chat))
        .nest_service("/static", ServeDir::new(&static_dir))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .with_state(state)
}

/// The blanket cross-origin policy both binaries attach to every response.
///
/// Origin, methods and headers are mirrored from the request rather than set
/// to `*`, which is the widest policy that can coexist with
/// `Access-Control-Allow-Credentials: true`. Swapping in a stricter policy
/// means replacing this one function; no handler knows about CORS.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::{Arc, Mutex};

    type ResponseBuilder = Arc<dyn Fn() -> Result<axum::response::Response, String> + Send + Sync>;

    /// Records every forwarded request and replays a canned response, a
    /// canned chunk stream, or a connection failure.
    pub struct MockHttpClient {
        pub requests: Arc<Mutex<Vec<MockRequest>>>,
        response_builder: ResponseBuilder,
    }

    #[derive(Debug, Clone)]
    pub struct MockRequest {
        pub method: String,
        pub uri: String,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl MockHttpClient {
        pub fn new(status: StatusCode, body: &str) -> Self {
            let body = body.to_string();
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                response_builder: Arc::new(move || {
                    Ok(axum::response::Response::builder()
                        .status(status)
                        .body(axum::body::Body::from(body.clone()))
                        .unwrap())
                }),
            }
        }

        pub fn new_streaming(status: StatusCode, chunks: Vec<String>) -> Self {
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                response_builder: Arc::new(move || {
                    use axum::body::Body;
                    use futures_util::stream;

                    let stream = stream::iter(
                        chunks
                            .clone()
                            .into_iter()
                            .map(|chunk| Ok::<_, std::io::Error>(chunk.into_bytes())),
                    );

                    Ok(axum::response::Response::builder()
                        .status(status)
                        .header("content-type", "application/x-ndjson")
                        .body(Body::from_stream(stream))
                        .unwrap())
                }),
            }
        }

        /// A client whose every request fails at the connection level.
        pub fn unreachable(message: &str) -> Self {
            let message = message.to_string();
            Self {
                requests: Arc::new(Mutex::new(Vec::new())),
                response_builder: Arc::new(move || Err(message.clone())),
            }
        }

        pub fn get_requests(&self) -> Vec<MockRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl std::fmt::Debug for MockHttpClient {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockHttpClient")
                .field("requests", &self.requests)
                .field("response_builder", &"<closure>")
                .finish()
        }
    }

    impl Clone for MockHttpClient {
        fn clone(&self) -> Self {
            Self {
                requests: Arc::clone(&self.requests),
                response_builder: Arc::clone(&self.response_builder),
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn request(
            &self,
            req: axum::extract::Request,
        ) -> Result<axum::response::Response, Box<dyn std::error::Error + Send + Sync>> {
            let method = req.method().to_string();
            let uri = req.uri().to_string();
            let headers = req
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                .collect();

            let body = axum::body::to_bytes(req.into_body(), usize::MAX)
                .await
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?
                .to_vec();

            self.requests.lock().unwrap().push(MockRequest {
                method,
                uri,
                headers,
                body,
            });

            (self.response_builder)().map_err(|e| e.into())
        }
    }
}
