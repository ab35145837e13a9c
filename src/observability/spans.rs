//! Spans carrying the correlation id through a resolution.

use tracing::Span;

/// Span wrapping one resolver operation.
pub fn resolution_span(operation: &'static str, correlation_id: Option<&str>) -> Span {
    tracing::debug_span!(
        "resolution",
        operation,
        correlation_id = correlation_id.unwrap_or_default()
    )
}
