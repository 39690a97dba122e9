//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wake the daemon's main task
//!
//! Shutdown (shutdown.rs):
//!     Deadline → bounds ShutdownHandle::shutdown / flush
//! ```
//!
//! # Design Decisions
//! - Teardown always runs under a deadline in the daemon
//! - Deadline expiry is reported as an error, never as success

pub mod shutdown;
pub mod signals;

pub use shutdown::Deadline;
