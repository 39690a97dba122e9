//! Telemetry lifecycle daemon.
//!
//! Starts a metrics export pipeline from a TOML config, waits for a
//! termination signal, and flushes under the configured deadline.
//!
//! ```text
//! TELEMETRY_CONFIG (default: telemetry.toml)
//!     → load + validate
//!     → init logging
//!     → LifecycleManager::init
//!     → wait for SIGINT/SIGTERM
//!     → ShutdownHandle::shutdown(shutdown_timeout)
//! ```

use std::path::PathBuf;

use telemetry_lifecycle::config::loader::load_config;
use telemetry_lifecycle::lifecycle::signals::wait_for_shutdown_signal;
use telemetry_lifecycle::observability::logging::init_logging;
use telemetry_lifecycle::{Deadline, LifecycleManager};

const CONFIG_ENV: &str = "TELEMETRY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "telemetry.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = load_config(&path)?;
    init_logging(&config.logging)?;

    tracing::info!(
        path = %path.display(),
        endpoint = %config.telemetry.endpoint,
        interval_ms = config.telemetry.interval_ms,
        "Configuration loaded"
    );

    let shutdown_timeout = config.telemetry.shutdown_timeout();
    let handle = LifecycleManager::init(config.telemetry)?;
    handle.install_global();

    wait_for_shutdown_signal().await;

    // A failed final flush is not fatal on the way out.
    if let Err(e) = handle.shutdown(Deadline::after(shutdown_timeout)).await {
        tracing::warn!(error = %e, "Metrics were not flushed before exit");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
