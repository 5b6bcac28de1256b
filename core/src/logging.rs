//! logging.rs
//! `tracing` subscriber setup for binaries and tests embedding this crate.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` (e.g. `"info"` or `"qrgrid_core=debug"`).
///
/// Safe to call more than once; later calls report the existing subscriber.
pub fn init_tracing(default_filter: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}
