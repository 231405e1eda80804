//! Generic fetch-and-relay proxy.
//!
//! # Data Flow
//! ```text
//! ProxyRequest (method, raw url param)
//!     → handler.rs (method check)
//!     → target.rs (decode, parse, scheme allow-list)
//!     → fetch.rs (GET under deadline, size guard)
//!     → headers.rs (allow-listed response headers)
//!     → FetchResult relayed, or ProxyError as plain text
//! ```
//!
//! # Design Decisions
//! - Linear: every failure short-circuits to a response, nothing is retried
//! - Configuration is passed in at construction and never read on the
//!   request path
//! - Responses are buffered in full; a truncated body is never relayed

pub mod error;
pub mod fetch;
pub mod handler;
pub mod headers;
pub mod target;

pub use error::{ProxyError, UrlRejection};
pub use fetch::{FetchResult, Fetcher};
pub use handler::{GenericProxy, ProxyRequest};
pub use headers::RELAYED_HEADERS;
