//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, apply TELEMETRY_* overrides)
//!     → validation.rs (semantic checks, endpoint parsing)
//!     → AppConfig (validated, immutable)
//!     → TelemetryConfig handed to LifecycleManager::init
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Pipeline cadence has no default; everything else does
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::AppConfig;
pub use schema::LoggingConfig;
pub use schema::TelemetryConfig;
