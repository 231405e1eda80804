//! HTTP host subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → request.rs (raw `url` parameter from the path)
//!     → proxy::GenericProxy (validate, fetch, guard)
//!     → relayed response or plain-text error
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{url_param, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
