//! Logging configuration for gql-fetch.
//!
//! Logs go to stderr so that stdout carries nothing but query outcomes.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Initializes logging to stderr.
///
/// Honors `RUST_LOG`, falling back to `info`. Calling it twice is harmless;
/// the second subscriber is ignored.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds the filter from `RUST_LOG` or the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
