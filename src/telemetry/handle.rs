//! Shutdown handle returned by `LifecycleManager::init`.

use std::sync::atomic::{AtomicBool, Ordering};

use opentelemetry::metrics::Meter;
use opentelemetry_sdk::error::OTelSdkResult;

use crate::lifecycle::Deadline;
use crate::telemetry::endpoint::Endpoint;
use crate::telemetry::error::{BoxError, TelemetryError, TelemetryResult};
use crate::telemetry::pipeline::ExportPipeline;

/// Capability to stop exactly one export pipeline.
///
/// The first [`shutdown`](Self::shutdown) moves the pipeline to its terminal
/// state; later calls return [`TelemetryError::AlreadyShutdown`].
///
/// Dropping a handle that was never shut down stops the pipeline on tokio's
/// blocking pool (or inline when no runtime is current), so the final export
/// never stalls the dropping thread. Its outcome is only logged; call
/// `shutdown` to observe it.
pub struct ShutdownHandle {
    pipeline: ExportPipeline,
    component: String,
    shut_down: AtomicBool,
}

impl ShutdownHandle {
    pub(crate) fn new(pipeline: ExportPipeline, component: String) -> Self {
        Self {
            pipeline,
            component,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Stop the periodic reader, flush buffered readings, and close the transport.
    ///
    /// Returns `Ok(())` only if flush and close both succeed before `deadline`.
    /// An expired deadline still stops the reader but returns promptly with
    /// [`TelemetryError::DeadlineExceeded`].
    pub async fn shutdown(&self, deadline: impl Into<Deadline>) -> TelemetryResult<()> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Err(TelemetryError::AlreadyShutdown);
        }

        let deadline = deadline.into();
        tracing::info!(
            component = %self.component,
            endpoint = %self.pipeline.endpoint(),
            deadline = ?deadline.remaining(),
            "Shutting down metrics pipeline"
        );

        let provider = self.pipeline.provider().clone();
        let result = self
            .run_blocking("shutdown", deadline, move || provider.shutdown())
            .await;

        match &result {
            Ok(()) => tracing::info!(component = %self.component, "Metrics pipeline shut down"),
            Err(e) => tracing::warn!(component = %self.component, error = %e, "Metrics pipeline shutdown failed"),
        }
        result
    }

    /// Export buffered readings now without stopping the pipeline.
    pub async fn flush(&self, deadline: impl Into<Deadline>) -> TelemetryResult<()> {
        if self.is_shut_down() {
            return Err(TelemetryError::AlreadyShutdown);
        }

        let provider = self.pipeline.provider().clone();
        self.run_blocking("flush", deadline.into(), move || provider.force_flush())
            .await
    }

    /// Run a provider call on the blocking pool under `deadline`.
    ///
    /// A failure carries the exporter's own error when one was recorded
    /// during the call; the SDK's error only names the phase that failed.
    async fn run_blocking<F>(&self, operation: &'static str, deadline: Deadline, call: F) -> TelemetryResult<()>
    where
        F: FnOnce() -> OTelSdkResult + Send + 'static,
    {
        let started = tokio::time::Instant::now();
        if let Some(e) = self.pipeline.take_failure() {
            tracing::debug!(component = %self.component, error = %e, "Discarding earlier periodic export failure");
        }

        match deadline.run(tokio::task::spawn_blocking(call)).await {
            Ok(Ok(Ok(()))) => Ok(()),
            Ok(Ok(Err(sdk_error))) => {
                let cause = match self.pipeline.take_failure() {
                    Some(export_error) => BoxError::from(export_error),
                    None => BoxError::from(sdk_error),
                };
                Err(TelemetryError::transport(operation, cause))
            }
            Ok(Err(join_error)) => Err(TelemetryError::transport(operation, join_error)),
            Err(_) => Err(TelemetryError::DeadlineExceeded(started.elapsed())),
        }
    }

    /// Register this pipeline as the process-wide meter provider.
    ///
    /// Replaces whatever provider was installed before.
    pub fn install_global(&self) {
        opentelemetry::global::set_meter_provider(self.pipeline.provider().clone());
        tracing::debug!(component = %self.component, "Installed global meter provider");
    }

    /// Meter for recording readings into this pipeline.
    pub fn meter(&self, scope: &'static str) -> Meter {
        self.pipeline.meter(scope)
    }

    pub fn endpoint(&self) -> &Endpoint {
        self.pipeline.endpoint()
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ShutdownHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownHandle")
            .field("component", &self.component)
            .field("endpoint", self.pipeline.endpoint())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

impl Drop for ShutdownHandle {
    fn drop(&mut self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::debug!(component = %self.component, "Shutdown handle dropped; stopping pipeline");
        let provider = self.pipeline.provider().clone();
        let component = std::mem::take(&mut self.component);
        let stop = move || {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(component = %component, error = %e, "Metrics pipeline stop on drop failed");
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn_blocking(stop);
            }
            Err(_) => stop(),
        }
    }
}
