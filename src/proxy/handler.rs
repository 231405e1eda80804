//! The proxy handler: method check, target validation, fetch, relay.

use std::time::Instant;

use axum::{
    http::Method,
    response::{IntoResponse, Response},
};

use crate::config::FetchConfig;
use crate::observability::metrics;
use crate::proxy::error::ProxyError;
use crate::proxy::fetch::{FetchResult, Fetcher};
use crate::proxy::target::parse_target;

/// The parts of an inbound request the handler looks at.
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub method: Method,
    /// Raw, still percent-encoded `url` path parameter.
    pub url: Option<String>,
}

impl ProxyRequest {
    pub fn new(method: Method, url: Option<impl Into<String>>) -> Self {
        Self {
            method,
            url: url.map(Into::into),
        }
    }
}

/// Fetch-and-relay handler for arbitrary http/https URLs.
///
/// Holds no per-request state; clones share one HTTP client.
#[derive(Debug, Clone)]
pub struct GenericProxy {
    fetcher: Fetcher,
}

impl GenericProxy {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
        })
    }

    /// Run the validate/fetch/guard sequence for one request.
    pub async fn handle(&self, request: &ProxyRequest) -> Result<FetchResult, ProxyError> {
        if !request.method.as_str().eq_ignore_ascii_case("GET") {
            return Err(ProxyError::InvalidMethod);
        }

        let target = parse_target(request.url.as_deref())?;
        self.fetcher.fetch(target).await
    }

    /// Like [`handle`](Self::handle), but always yields a response and
    /// records the outcome.
    pub async fn respond(&self, request: &ProxyRequest) -> Response {
        let start = Instant::now();

        match self.handle(request).await {
            Ok(result) => {
                tracing::debug!(
                    status = %result.status,
                    bytes = result.body.len(),
                    "Relaying upstream response"
                );
                metrics::record_outcome("relayed", result.status.as_u16(), start);
                metrics::record_response_bytes(result.body.len());
                result.into_response()
            }
            Err(e) => {
                tracing::debug!(outcome = e.outcome(), error = %e, "Proxy request rejected");
                metrics::record_outcome(e.outcome(), e.status().as_u16(), start);
                e.into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn proxy() -> GenericProxy {
        GenericProxy::new(&FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_non_get_methods_rejected() {
        let proxy = proxy();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD, Method::OPTIONS] {
            let request = ProxyRequest::new(method, Some("https%3A%2F%2Fexample.com"));
            let err = proxy.handle(&request).await.unwrap_err();
            assert!(matches!(err, ProxyError::InvalidMethod));
        }
    }

    #[tokio::test]
    async fn test_method_checked_before_parameter() {
        let request = ProxyRequest::new(Method::POST, None::<String>);
        let response = proxy().respond(&request).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_lowercase_get_accepted() {
        let method = Method::from_bytes(b"get").unwrap();
        let request = ProxyRequest::new(method, Some("ftp%3A%2F%2Fexample.com"));
        // Passes the method check and fails on the scheme instead
        let err = proxy().handle(&request).await.unwrap_err();
        assert!(matches!(err, ProxyError::MalformedUrl(_)));
    }

    #[tokio::test]
    async fn test_missing_url_is_bad_request() {
        let request = ProxyRequest::new(Method::GET, None::<String>);
        let response = proxy().respond(&request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
