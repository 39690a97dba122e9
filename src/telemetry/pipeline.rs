//! The export pipeline owned by one shutdown handle.

use std::time::Instant;

use opentelemetry::metrics::{Meter, MeterProvider as _, ObservableGauge};
use opentelemetry::KeyValue;
use opentelemetry_sdk::error::OTelSdkError;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::Resource;

use crate::config::TelemetryConfig;
use crate::telemetry::endpoint::Endpoint;
use crate::telemetry::error::TelemetryResult;
use crate::telemetry::transport::{build_exporter, ExportFailure, ObservedExporter};

/// Instrumentation scope for the pipeline's own instruments.
pub const PIPELINE_SCOPE: &str = "telemetry-lifecycle";

/// Built-in gauge; guarantees every flush has at least one data point.
pub const UPTIME_METRIC: &str = "telemetry.pipeline.uptime";

const SERVICE_VERSION: &str = "service.version";

/// Exporter, resource, and periodic reader for a single `init` call.
///
/// Never shared between handles.
pub(crate) struct ExportPipeline {
    provider: SdkMeterProvider,
    endpoint: Endpoint,
    failure: ExportFailure,
    _uptime: ObservableGauge<f64>,
}

impl ExportPipeline {
    /// Assemble the pipeline and start the periodic reader.
    ///
    /// Does not connect to the collector.
    pub(crate) fn start(config: &TelemetryConfig, endpoint: Endpoint) -> TelemetryResult<Self> {
        let failure = ExportFailure::default();
        let exporter = ObservedExporter::new(
            build_exporter(&endpoint, config.export_timeout())?,
            failure.clone(),
        );

        let reader = PeriodicReader::builder(exporter)
            .with_interval(config.interval())
            .build();

        let provider = SdkMeterProvider::builder()
            .with_reader(reader)
            .with_resource(build_resource(&config.component_name, &config.component_version))
            .build();

        let started = Instant::now();
        let uptime = provider
            .meter(PIPELINE_SCOPE)
            .f64_observable_gauge(UPTIME_METRIC)
            .with_unit("s")
            .with_description("Seconds since the export pipeline started")
            .with_callback(move |observer| observer.observe(started.elapsed().as_secs_f64(), &[]))
            .build();

        Ok(Self {
            provider,
            endpoint,
            failure,
            _uptime: uptime,
        })
    }

    pub(crate) fn provider(&self) -> &SdkMeterProvider {
        &self.provider
    }

    pub(crate) fn meter(&self, scope: &'static str) -> Meter {
        self.provider.meter(scope)
    }

    pub(crate) fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Last transport failure seen by the exporter, if any. Clears it.
    pub(crate) fn take_failure(&self) -> Option<OTelSdkError> {
        self.failure.take()
    }
}

/// Resource attributes attached to every exported data point.
pub(crate) fn build_resource(component_name: &str, component_version: &str) -> Resource {
    Resource::builder()
        .with_service_name(component_name.to_string())
        .with_attribute(KeyValue::new(SERVICE_VERSION, component_version.to_string()))
        .build()
}
