//! Shared utilities for pipeline integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use opentelemetry_proto::tonic::collector::metrics::v1::{
    metrics_service_server::{MetricsService, MetricsServiceServer},
    ExportMetricsServiceRequest, ExportMetricsServiceResponse,
};
use opentelemetry_proto::tonic::common::v1::any_value;
use tokio::io::AsyncReadExt;
use tokio::net::UnixListener;
use tokio_stream::wrappers::UnixListenerStream;
use tonic::{Request, Response, Status};

/// Requests received by a mock collector.
pub type Received = Arc<Mutex<Vec<ExportMetricsServiceRequest>>>;

/// Socket path inside a fresh temp dir. Keep the dir alive for the test.
pub fn socket_path(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}

/// Listener that accepts connections and never answers.
#[allow(dead_code)]
pub fn start_bare_listener(path: &Path) {
    let listener = UnixListener::bind(path).unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 1024];
                while let Ok(n) = socket.read(&mut buf).await {
                    if n == 0 {
                        break;
                    }
                }
            });
        }
    });
}

struct RecordingService {
    received: Received,
}

#[tonic::async_trait]
impl MetricsService for RecordingService {
    async fn export(
        &self,
        request: Request<ExportMetricsServiceRequest>,
    ) -> Result<Response<ExportMetricsServiceResponse>, Status> {
        self.received.lock().unwrap().push(request.into_inner());
        Ok(Response::new(ExportMetricsServiceResponse::default()))
    }
}

/// Start an OTLP metrics collector on a Unix socket that records every export.
#[allow(dead_code)]
pub async fn start_mock_collector(path: &Path) -> Received {
    let listener = UnixListener::bind(path).unwrap();
    let incoming = UnixListenerStream::new(listener);
    let received = Received::default();

    let service = RecordingService {
        received: received.clone(),
    };
    tokio::spawn(async move {
        let _ = tonic::transport::Server::builder()
            .add_service(MetricsServiceServer::new(service))
            .serve_with_incoming(incoming)
            .await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    received
}

/// String resource attribute from the first resource in `request`.
#[allow(dead_code)]
pub fn resource_attribute(request: &ExportMetricsServiceRequest, key: &str) -> Option<String> {
    let resource = request.resource_metrics.first()?.resource.as_ref()?;
    resource
        .attributes
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_ref())
        .and_then(|v| match &v.value {
            Some(any_value::Value::StringValue(s)) => Some(s.clone()),
            _ => None,
        })
}

/// Metric names carried by `request`.
#[allow(dead_code)]
pub fn metric_names(request: &ExportMetricsServiceRequest) -> Vec<String> {
    request
        .resource_metrics
        .iter()
        .flat_map(|rm| &rm.scope_metrics)
        .flat_map(|sm| &sm.metrics)
        .map(|m| m.name.clone())
        .collect()
}
