//! Configuration loading from disk and the environment.
//!
//! Precedence, highest first: the `--bind` flag (listener address only),
//! environment variables, the TOML file, built-in defaults.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GenericProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Overrides `fetch.timeout_ms`.
pub const ENV_TIMEOUT: &str = "GENERIC_PROXY_TIMEOUT";
/// Overrides `fetch.max_response_size`.
pub const ENV_MAX_SIZE: &str = "GENERIC_PROXY_MAX_SIZE";
/// Overrides `fetch.user_agent`.
pub const ENV_USER_AGENT: &str = "GENERIC_PROXY_UA";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{key} has an invalid value: {value:?}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file plus the process environment.
///
/// `bind_override` (the `--bind` flag) replaces `listener.bind_address`
/// before validation runs.
pub fn load_config(
    path: Option<&Path>,
    bind_override: Option<&str>,
) -> Result<GenericProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GenericProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| env::var(key).ok())?;
    if let Some(bind) = bind_override {
        config.listener.bind_address = bind.to_string();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut GenericProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(ENV_TIMEOUT) {
        config.fetch.timeout_ms = parse_env(ENV_TIMEOUT, value)?;
    }
    if let Some(value) = lookup(ENV_MAX_SIZE) {
        config.fetch.max_response_size = parse_env(ENV_MAX_SIZE, value)?;
    }
    if let Some(value) = lookup(ENV_USER_AGENT) {
        config.fetch.user_agent = value;
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { key, value })
}
