//! Generic fetch-and-relay proxy for arbitrary http/https resources.
//!
//! The core is [`GenericProxy`]: hand it a method and a URL-encoded target,
//! get back the origin's status, a filtered header set and the buffered body,
//! or a plain-text error. The rest of the crate is a small axum host around it.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod metadata;
pub mod observability;
pub mod proxy;

pub use config::schema::GenericProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::{GenericProxy, ProxyError, ProxyRequest};
