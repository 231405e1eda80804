//! Proxy error taxonomy.
//!
//! Every variant is terminal: the handler never retries, and each one maps
//! to exactly one status code and one plain-text body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a URL parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    #[error("percent-decoding failed")]
    Decode,

    #[error("not an absolute URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme `{0}`")]
    Scheme(String),
}

/// Errors produced while handling a proxy request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Inbound method was not GET.
    #[error("method not allowed")]
    InvalidMethod,

    /// The `url` path parameter was absent or empty.
    #[error("url parameter missing")]
    MissingParameter,

    /// Decoding, parsing or scheme check failed.
    #[error("malformed target url: {0}")]
    MalformedUrl(#[from] UrlRejection),

    /// The outbound deadline fired before the response completed.
    #[error("upstream did not respond within {0} ms")]
    Timeout(u64),

    /// Any other failure during the outbound exchange.
    #[error("upstream fetch failed: {0}")]
    FetchFailure(#[from] reqwest::Error),

    /// The origin body exceeded the configured cap.
    #[error("upstream body exceeds {limit} bytes")]
    OversizedResponse { limit: usize },
}

impl ProxyError {
    /// Status code returned to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::MissingParameter | ProxyError::MalformedUrl(_) => StatusCode::BAD_REQUEST,
            ProxyError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ProxyError::FetchFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::OversizedResponse { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Body returned to the client. Never includes the underlying cause.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidMethod => "Method Not Allowed",
            ProxyError::MissingParameter => "URL parameter is required",
            ProxyError::MalformedUrl(_) => "Invalid URL format",
            ProxyError::Timeout(_) => "Request timeout",
            ProxyError::FetchFailure(_) => "Internal server error while fetching the file",
            ProxyError::OversizedResponse { .. } => "Response too large",
        }
    }

    /// Short label used for metrics and log fields.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::InvalidMethod => "invalid_method",
            ProxyError::MissingParameter => "missing_parameter",
            ProxyError::MalformedUrl(_) => "malformed_url",
            ProxyError::Timeout(_) => "timeout",
            ProxyError::FetchFailure(_) => "fetch_failure",
            ProxyError::OversizedResponse { .. } => "oversized_response",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.public_message();
        match self {
            ProxyError::InvalidMethod => (status, [(header::ALLOW, "GET")], body).into_response(),
            _ => (status, body).into_response(),
        }
    }
}
