//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Parse the collector endpoint into a transport selection
//! - Validate value ranges (interval > 0, export timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function and runs before any resource is acquired

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::{AppConfig, TelemetryConfig};
use crate::telemetry::endpoint::{Endpoint, EndpointError};

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("telemetry.endpoint: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("telemetry.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("telemetry.export_timeout_ms must be greater than zero")]
    ZeroExportTimeout,

    #[error("logging.level is not a valid filter: {0}")]
    LogFilter(String),
}

/// Validate the pipeline settings, returning the parsed endpoint on success.
pub fn validate_telemetry(config: &TelemetryConfig) -> Result<Endpoint, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let endpoint = match config.endpoint.parse::<Endpoint>() {
        Ok(endpoint) => Some(endpoint),
        Err(e) => {
            errors.push(ValidationError::Endpoint(e));
            None
        }
    };

    if config.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if config.export_timeout_ms == 0 {
        errors.push(ValidationError::ZeroExportTimeout);
    }

    match endpoint {
        Some(endpoint) if errors.is_empty() => Ok(endpoint),
        _ => Err(errors),
    }
}

/// Validate a full application config.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = match validate_telemetry(&config.telemetry) {
        Ok(_) => Vec::new(),
        Err(errors) => errors,
    };

    if let Err(e) = EnvFilter::try_new(&config.logging.level) {
        errors.push(ValidationError::LogFilter(e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Join errors into a single line for display.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
