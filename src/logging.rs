//! Logging configuration for dorm-report.
//!
//! Logs go to stderr so they never mix with the completion banner on stdout
//! or with the result file.

use tracing_subscriber::EnvFilter;

/// Initializes stderr logging with an env-filter (default level: info).
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
