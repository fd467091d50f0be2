//! Observability bootstrap
//!
//! Initializes the global tracing subscriber. Filtering is controlled via
//! `RUST_LOG` with an `info` default.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops (relevant for
/// tests that share a process).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
