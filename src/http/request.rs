//! Inbound request handling.
//!
//! # Responsibilities
//! - Generate a request ID (UUID v4) when the client did not send one
//! - Open a tracing span carrying the request ID
//! - Extract the raw `url` path parameter for the proxy handler
//!
//! # Design Decisions
//! - The `url` parameter is taken from the raw request path, still
//!   percent-encoded, so the proxy handler performs the only decode
//! - The inbound query string is not part of the parameter

use axum::{
    body::Body,
    http::{HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::metadata::NAMESPACE_PATH;

/// Header carrying the request ID on requests and responses.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Span for one inbound request, tagged with its request ID.
pub fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path()
    )
}

/// Raw `url` parameter: everything in the path after `/generic_proxy/`.
pub fn url_param(path: &str) -> Option<&str> {
    path.strip_prefix(NAMESPACE_PATH)?.strip_prefix('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_param_keeps_encoding() {
        assert_eq!(
            url_param("/generic_proxy/https%3A%2F%2Fexample.com%2Frss.xml"),
            Some("https%3A%2F%2Fexample.com%2Frss.xml")
        );
    }

    #[test]
    fn test_url_param_spans_slashes() {
        assert_eq!(
            url_param("/generic_proxy/https://example.com/a/b"),
            Some("https://example.com/a/b")
        );
    }

    #[test]
    fn test_url_param_empty_and_absent() {
        assert_eq!(url_param("/generic_proxy/"), Some(""));
        assert_eq!(url_param("/generic_proxy"), None);
        assert_eq!(url_param("/other/https%3A%2F%2Fexample.com"), None);
    }

    #[test]
    fn test_uuid_request_id() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let id = UuidRequestId.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
