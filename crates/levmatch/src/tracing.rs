//! Logging setup shared by levmatch binaries.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with levmatch defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG)
/// - Compact format on stderr, keeping stdout free for results
pub fn init() -> Result<(), TryInitError> {
    init_with_filter("info")
}

/// Initialize tracing with a custom default filter.
///
/// `RUST_LOG` still wins when set. Fails if a global subscriber is
/// already installed.
pub fn init_with_filter(default_filter: &str) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init()
}
