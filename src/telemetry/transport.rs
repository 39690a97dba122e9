//! OTLP exporter construction.
//!
//! # Responsibilities
//! - Map a parsed [`Endpoint`] onto a gRPC channel
//! - Build the OTLP metric exporter on top of that channel
//! - Keep the most recent export failure so callers see the real cause
//!
//! # Design Decisions
//! - Channels are created lazily: nothing is dialled until the first export,
//!   so an unreachable collector only surfaces at flush time
//! - Unix sockets use a custom connector; network targets use tonic's own

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use opentelemetry_otlp::{MetricExporter, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::error::{OTelSdkError, OTelSdkResult};
use opentelemetry_sdk::metrics::data::ResourceMetrics;
use opentelemetry_sdk::metrics::exporter::PushMetricExporter;
use opentelemetry_sdk::metrics::Temporality;

use crate::telemetry::endpoint::Endpoint;
use crate::telemetry::error::{TelemetryError, TelemetryResult};

/// Placeholder authority for socket channels; the connector ignores it.
#[cfg(unix)]
const UNIX_SOCKET_AUTHORITY: &str = "http://localhost";

/// Build an exporter for `endpoint` without connecting.
///
/// Must be called from within a tokio runtime.
pub(crate) fn build_exporter(endpoint: &Endpoint, timeout: Duration) -> TelemetryResult<MetricExporter> {
    let builder = MetricExporter::builder().with_tonic().with_timeout(timeout);

    let builder = match endpoint {
        Endpoint::UnixSocket(path) => builder.with_channel(unix_channel(path.clone(), timeout)?),
        Endpoint::Grpc(url) => builder.with_endpoint(url.as_str()),
    };

    builder
        .build()
        .map_err(|e| TelemetryError::transport("exporter build", e))
}

/// Slot holding the last export failure, shared with the owning handle.
#[derive(Clone, Default)]
pub(crate) struct ExportFailure(Arc<Mutex<Option<OTelSdkError>>>);

impl ExportFailure {
    /// Take the recorded failure, leaving the slot empty.
    pub(crate) fn take(&self) -> Option<OTelSdkError> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }

    fn record(&self, err: OTelSdkError) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(err);
        }
    }
}

/// OTLP exporter that remembers why its last export failed.
///
/// The SDK collapses reader failures into a generic message; this keeps the
/// transport's own error (e.g. `Unavailable` with the OS cause).
pub(crate) struct ObservedExporter {
    inner: MetricExporter,
    failure: ExportFailure,
}

impl ObservedExporter {
    pub(crate) fn new(inner: MetricExporter, failure: ExportFailure) -> Self {
        Self { inner, failure }
    }
}

#[async_trait]
impl PushMetricExporter for ObservedExporter {
    async fn export(&self, metrics: &mut ResourceMetrics) -> OTelSdkResult {
        match self.inner.export(metrics).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::debug!(error = %e, "Metrics export failed");
                let summary = OTelSdkError::InternalFailure(e.to_string());
                self.failure.record(e);
                Err(summary)
            }
        }
    }

    async fn force_flush(&self) -> OTelSdkResult {
        self.inner.force_flush().await
    }

    fn shutdown(&self) -> OTelSdkResult {
        self.inner.shutdown()
    }

    fn temporality(&self) -> Temporality {
        self.inner.temporality()
    }
}

#[cfg(unix)]
fn unix_channel(path: PathBuf, timeout: Duration) -> TelemetryResult<tonic::transport::Channel> {
    use hyper_util::rt::TokioIo;
    use tokio::net::UnixStream;
    use tonic::transport::{Endpoint as ChannelEndpoint, Uri};
    use tower::service_fn;

    let endpoint = ChannelEndpoint::try_from(UNIX_SOCKET_AUTHORITY)
        .map_err(|e| TelemetryError::transport("channel setup", e))?
        .timeout(timeout);

    Ok(endpoint.connect_with_connector_lazy(service_fn(move |_: Uri| {
        let path = path.clone();
        async move {
            let stream = UnixStream::connect(&path).await?;
            Ok::<_, std::io::Error>(TokioIo::new(stream))
        }
    })))
}

#[cfg(not(unix))]
fn unix_channel(path: PathBuf, _timeout: Duration) -> TelemetryResult<tonic::transport::Channel> {
    Err(TelemetryError::transport(
        "channel setup",
        format!(
            "unix socket endpoints are not supported on this platform: {}",
            path.display()
        ),
    ))
}
