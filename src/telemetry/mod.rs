//! Metrics export pipeline lifecycle.
//!
//! # Data Flow
//! ```text
//! TelemetryConfig
//!     → validation (endpoint scheme, interval > 0)
//!     → transport.rs (lazy gRPC channel + OTLP exporter)
//!     → pipeline.rs (resource attributes + periodic reader + meter provider)
//!     → ShutdownHandle (held by the caller)
//!
//! On teardown:
//!     ShutdownHandle::shutdown(deadline)
//!     → stop periodic reader → final flush → close exporter
//! ```
//!
//! # Design Decisions
//! - Init never dials the collector; connection failures surface at flush
//! - Each init builds an independent pipeline; nothing is registered
//!   globally unless the caller asks via `install_global`
//! - Periodic export failures are logged by the SDK through `tracing`;
//!   only flushes requested by the caller return errors
//! - A second shutdown is an error, not a no-op

pub mod endpoint;
pub mod error;
pub mod handle;
pub mod pipeline;
mod transport;

pub use endpoint::Endpoint;
pub use error::{TelemetryError, TelemetryResult};
pub use handle::ShutdownHandle;

use crate::config::validation::validate_telemetry;
use crate::config::TelemetryConfig;
use pipeline::ExportPipeline;

/// Entry point for building export pipelines.
pub struct LifecycleManager;

impl LifecycleManager {
    /// Validate `config`, build its pipeline, and start periodic export.
    ///
    /// Succeeds even when no collector is listening. Fails with
    /// [`TelemetryError::Config`] before acquiring anything if the endpoint
    /// or interval is invalid, and with [`TelemetryError::NoRuntime`] when
    /// called outside a tokio runtime.
    pub fn init(config: TelemetryConfig) -> TelemetryResult<ShutdownHandle> {
        let endpoint = validate_telemetry(&config).map_err(TelemetryError::Config)?;

        tokio::runtime::Handle::try_current().map_err(|_| TelemetryError::NoRuntime)?;

        let pipeline = ExportPipeline::start(&config, endpoint)?;

        tracing::info!(
            component = %config.component_name,
            version = %config.component_version,
            endpoint = %pipeline.endpoint(),
            transport = pipeline.endpoint().scheme(),
            interval_ms = config.interval_ms,
            "Metrics pipeline started"
        );

        Ok(ShutdownHandle::new(pipeline, config.component_name))
    }
}
