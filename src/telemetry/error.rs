//! Pipeline error definitions.

use std::time::Duration;

use thiserror::Error;

use crate::config::validation::{join_errors, ValidationError};

/// Boxed underlying failure carried by [`TelemetryError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the lifecycle manager and its shutdown handle.
///
/// Nothing is retried internally; every failure reaches the caller.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Rejected by `init` before any resource was acquired.
    #[error("invalid telemetry configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    /// `init` was called outside a tokio runtime.
    #[error("no tokio runtime available to drive the export transport")]
    NoRuntime,

    /// Exporter construction, export, or close failed.
    #[error("transport error during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// The caller's deadline elapsed before flush and close completed.
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    #[error("pipeline already shut down")]
    AlreadyShutdown,
}

impl TelemetryError {
    pub(crate) fn transport(operation: &'static str, source: impl Into<BoxError>) -> Self {
        TelemetryError::Transport {
            operation,
            source: source.into(),
        }
    }

    /// True for errors the caller fixes by changing configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, TelemetryError::Config(_) | TelemetryError::NoRuntime)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, TelemetryError::Transport { .. })
    }

    pub fn is_deadline(&self) -> bool {
        matches!(self, TelemetryError::DeadlineExceeded(_))
    }
}

/// Result type for pipeline operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
