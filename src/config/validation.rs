//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeout and size cap > 0)
//! - Check that the user agent can be sent as a header
//! - Check that addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: &GenericProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs after environment overrides, before the config is accepted

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::GenericProxyConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("fetch.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("fetch.max_response_size must be greater than zero")]
    ZeroMaxResponseSize,

    #[error("fetch.user_agent must be a non-empty header value")]
    InvalidUserAgent,

    #[error("{field} is not a socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GenericProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.fetch.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.fetch.max_response_size == 0 {
        errors.push(ValidationError::ZeroMaxResponseSize);
    }
    if config.fetch.user_agent.trim().is_empty()
        || HeaderValue::from_str(&config.fetch.user_agent).is_err()
    {
        errors.push(ValidationError::InvalidUserAgent);
    }
    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
