//! Host-level responses that do not come from the proxy handler.
//!
//! Proxy errors render themselves through `ProxyError: IntoResponse`; this
//! module only covers requests that never reach the handler.

use axum::{http::StatusCode, response::IntoResponse};

/// Fallback for paths outside the namespace.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
