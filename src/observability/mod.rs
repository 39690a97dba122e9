//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Lifecycle events, config loading, SDK export diagnostics
//!     → logging.rs (structured log events)
//!     → stdout
//! ```
//!
//! Metrics themselves flow through `telemetry`, not through here.

pub mod logging;
