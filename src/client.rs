//! HTTP client abstraction for talking to the upstream inference service
//!
//! The relay only ever makes two kinds of upstream calls, but hiding the
//! client behind a trait lets the tests substitute a mock that records the
//! forwarded request and replays canned (or streamed) responses.
use async_trait::async_trait;
use axum::response::IntoResponse;
use hyper_util::{client::legacy::Client, rt::TokioExecutor};

pub type HyperClient = Client<
    hyper_tls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    axum::body::Body,
>;

#[async_trait]
pub trait HttpClient: std::fmt::Debug {
    async fn request(
        &self,
        req: axum::extract::Request,
    ) -> Result<axum::response::Response, Box<dyn std::error::Error + Send + Sync>>;
}

#[async_trait]
impl HttpClient for HyperClient {
    async fn request(
        &self,
        req: axum::extract::Request,
    ) -> Result<axum::response::Response, Box<dyn std::error::Error + Send + Sync>> {
        self.request(req)
            .await
            .map(|res| res.into_response())
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
    }
}

/// Build the client used for upstream calls.
///
/// No request timeout is configured anywhere: chat generation time is
/// unbounded, and a deadline here would cut live streams short.
pub fn create_hyper_client() -> HyperClient {
    let https = hyper_tls::HttpsConnector::new();

    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .pool_timer(hyper_util::rt::TokioTimer::new())
        .build(https)
}
