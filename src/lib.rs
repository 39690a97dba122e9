//! Metrics telemetry lifecycle manager.
//!
//! Builds a periodic OTLP metrics export pipeline from configuration,
//! tags it with component identity, and tears it down under a deadline.

pub mod config;
pub mod exec;
pub mod lifecycle;
pub mod observability;
pub mod telemetry;

pub use config::schema::{AppConfig, TelemetryConfig};
pub use lifecycle::Deadline;
pub use telemetry::{LifecycleManager, ShutdownHandle, TelemetryError};
