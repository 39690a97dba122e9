//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{join_errors, validate_config, ValidationError};

/// Overrides the collector endpoint from the file.
pub const ENDPOINT_ENV: &str = "TELEMETRY_ENDPOINT";

/// Overrides the export interval (milliseconds) from the file.
pub const INTERVAL_ENV: &str = "TELEMETRY_INTERVAL_MS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} is not a valid value: {value:?}")]
    Env { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Load and validate configuration from a TOML file.
///
/// Environment overrides are applied between parsing and validation.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `TELEMETRY_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(endpoint) = lookup(ENDPOINT_ENV) {
        tracing::debug!(endpoint = %endpoint, "Endpoint overridden from environment");
        config.telemetry.endpoint = endpoint;
    }

    if let Some(value) = lookup(INTERVAL_ENV) {
        config.telemetry.interval_ms = value.trim().parse().map_err(|_| ConfigError::Env {
            name: INTERVAL_ENV,
            value,
        })?;
    }

    Ok(())
}
