//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HttpConnectionResolver operations produce:
//!     → spans.rs (one span per operation, tagged with the correlation id)
//!     → metrics.rs (resolution counters by operation and outcome)
//!
//! The binary installs:
//!     → logging.rs (tracing-subscriber, env filter)
//! ```
//!
//! # Design Decisions
//! - The library only emits; subscribers and recorders belong to the binary
//! - Errors are returned to the caller, never logged here
//! - Credential values never reach a log field

pub mod logging;
pub mod metrics;
pub mod spans;
