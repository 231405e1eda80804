//! Outbound fetch with a deadline and a size guard.
//!
//! # Responsibilities
//! - Issue one GET per call with the configured identity headers
//! - Race the whole exchange (headers and body) against a deadline
//! - Buffer the body, refusing anything above the size cap
//!
//! # Design Decisions
//! - The deadline is enforced with `tokio::time::timeout`; when it fires the
//!   exchange future is dropped, which aborts the in-flight connection, and
//!   when the exchange wins the timer is dropped with it
//! - No reads happen after the deadline fires
//! - A declared `content-length` over the cap is rejected before any body
//!   bytes are read; otherwise the cap is checked chunk by chunk
//! - System proxy environment variables are ignored

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use url::Url;

use crate::config::FetchConfig;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::filter_headers;

/// A fully buffered origin response, ready to relay.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl IntoResponse for FetchResult {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

/// Outbound HTTP client bound to one immutable [`FetchConfig`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    timeout_ms: u64,
    max_response_size: usize,
}

impl Fetcher {
    /// Build the client. Fails if the user agent is not a valid header value.
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let mut defaults = HeaderMap::new();
        defaults.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(defaults)
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            timeout_ms: config.timeout_ms,
            max_response_size: config.max_response_size,
        })
    }

    /// Fetch `target`, giving up once the configured deadline passes.
    pub async fn fetch(&self, target: Url) -> Result<FetchResult, ProxyError> {
        let deadline = Duration::from_millis(self.timeout_ms);
        match tokio::time::timeout(deadline, self.exchange(target)).await {
            Ok(result) => result,
            Err(_) => Err(ProxyError::Timeout(self.timeout_ms)),
        }
    }

    async fn exchange(&self, target: Url) -> Result<FetchResult, ProxyError> {
        let mut response = self.client.get(target).send().await?;

        let status = response.status();
        let headers = filter_headers(response.headers());
        let limit = self.max_response_size;

        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(ProxyError::OversizedResponse { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(ProxyError::OversizedResponse { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchResult {
            status,
            headers,
            body: Bytes::from(body),
        })
    }
}
