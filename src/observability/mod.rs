//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Host and handler produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - The handler only emits debug-level events; request/response logging is
//!   done by tower_http's TraceLayer in the host
//! - Request ID flows through every response

pub mod logging;
pub mod metrics;
