//! Configuration schema definitions.
//!
//! All types derive `Deserialize` for loading from config files.
//! Durations are stored as whole milliseconds.

use std::time::Duration;

use serde::Deserialize;

/// Root configuration for the telemetry daemon.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Metrics export pipeline settings.
    pub telemetry: TelemetryConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for one metrics export pipeline.
///
/// Immutable once handed to [`LifecycleManager::init`](crate::telemetry::LifecycleManager::init).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Collector endpoint (e.g., "unix:///run/collector.sock", "http://127.0.0.1:4317").
    pub endpoint: String,

    /// Export interval in milliseconds. No default: the caller chooses the cadence.
    pub interval_ms: u64,

    /// Reported as the `service.name` resource attribute.
    pub component_name: String,

    /// Reported as the `service.version` resource attribute.
    pub component_version: String,

    /// Timeout for a single export request in milliseconds.
    #[serde(default = "default_export_timeout_ms")]
    pub export_timeout_ms: u64,

    /// Deadline the daemon grants the final flush on teardown, in milliseconds.
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

fn default_export_timeout_ms() -> u64 {
    10_000
}

fn default_shutdown_timeout_ms() -> u64 {
    5_000
}

impl TelemetryConfig {
    /// Build a config from the four required settings; the rest take defaults.
    ///
    /// Sub-millisecond precision in `interval` is truncated.
    pub fn new(
        endpoint: impl Into<String>,
        interval: Duration,
        component_name: impl Into<String>,
        component_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            interval_ms: duration_to_ms(interval),
            component_name: component_name.into(),
            component_version: component_version.into(),
            export_timeout_ms: default_export_timeout_ms(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }

    /// Override the per-export timeout.
    pub fn with_export_timeout(mut self, timeout: Duration) -> Self {
        self.export_timeout_ms = duration_to_ms(timeout);
        self
    }

    /// Override the teardown deadline used by the daemon.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout_ms = duration_to_ms(timeout);
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn export_timeout(&self) -> Duration {
        Duration::from_millis(self.export_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "telemetry_lifecycle=info,opentelemetry=warn".to_string(),
        }
    }
}
