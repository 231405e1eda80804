//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every field has a default so an empty file is a valid config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default outbound deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default response size cap (10 MiB).
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Default outbound `user-agent`.
pub const DEFAULT_USER_AGENT: &str = "RSSHub (Generic Proxy)";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GenericProxyConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Outbound fetch tunables.
    pub fetch: FetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:1200").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:1200".to_string(),
        }
    }
}

/// Outbound fetch configuration, shared read-only by every request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Deadline for the whole outbound exchange in milliseconds.
    pub timeout_ms: u64,

    /// Largest body relayed, in bytes.
    pub max_response_size: usize,

    /// Value of the outbound `user-agent` header.
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenericProxyConfig::default();
        assert_eq!(config.fetch.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.fetch.max_response_size, 10_485_760);
        assert_eq!(config.fetch.user_agent, "RSSHub (Generic Proxy)");
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GenericProxyConfig = toml::from_str(
            r#"
            [fetch]
            timeout_ms = 2500
            "#,
        )
        .unwrap();
        assert_eq!(config.fetch.timeout_ms, 2500);
        assert_eq!(config.fetch.max_response_size, DEFAULT_MAX_RESPONSE_SIZE);
        assert_eq!(config.listener.bind_address, "0.0.0.0:1200");
    }
}
