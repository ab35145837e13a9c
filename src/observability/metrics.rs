//! Resolution metrics.
//!
//! # Metrics
//! - `connection_resolutions_total` (counter): resolver calls by `operation`
//!   (`resolve`, `resolve_all`, `register`) and `outcome` (`ok`, `error`)

pub const RESOLUTIONS_TOTAL: &str = "connection_resolutions_total";

/// Count one finished resolver call.
pub fn record_resolution(operation: &'static str, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    ::metrics::counter!(RESOLUTIONS_TOTAL, "operation" => operation, "outcome" => outcome)
        .increment(1);
}
