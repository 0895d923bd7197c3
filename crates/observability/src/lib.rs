//! Tracing/logging setup shared by every process embedding the engine.

/// Initialize process-wide tracing with the default `info` filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init("info");
}

/// Like [`init`], with a fallback filter used when `RUST_LOG` is unset
/// (e.g. `"menuwise_analytics=debug"`).
pub fn init_with_default_filter(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
