//! Process-wide tracing setup.

/// Initialize process-wide observability (JSON tracing).
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init(DEFAULT_FILTER);
}

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Tracing subscriber configuration (filter, JSON formatter).
pub mod tracing;
