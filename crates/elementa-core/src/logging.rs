//! JSON log output for embedders that run Elementa headless.
//!
//! Kernels only emit `tracing` events; installing a subscriber is left to the
//! application. [`init`] is a convenience for the common case: JSON lines on
//! stderr, filtered by `RUST_LOG` (default `warn`).

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
