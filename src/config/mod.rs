//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (GENERIC_PROXY_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → GenericProxyConfig (validated, immutable)
//!     → FetchConfig handed to the proxy handler at construction
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup and never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::FetchConfig;
pub use schema::GenericProxyConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
