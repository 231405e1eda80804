//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Order: config, metrics exporter, HTTP client, listener
//! - The listener binds last so traffic only arrives when ready

use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, GenericProxyConfig};
use crate::http::HttpServer;
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("bind: {0}")]
    Bind(#[from] std::io::Error),
}

/// Resolve configuration from an optional file plus the environment.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<GenericProxyConfig, StartupError> {
    Ok(load_config(path, bind_override.as_deref())?)
}

/// Initialize subsystems and bind the listener.
pub async fn start(config: GenericProxyConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    if config.observability.metrics_enabled {
        // validated by config::validation when metrics are enabled
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&bind_address).await?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok((server, listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_applies_bind_flag() {
        let config = resolve_config(None, Some("127.0.0.1:9999".into())).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");
    }

    #[test]
    fn test_resolve_config_rejects_bad_bind_flag() {
        let err = resolve_config(None, Some("::nope".into())).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }
}
