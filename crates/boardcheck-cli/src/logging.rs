//! Tracing subscriber setup
//!
//! Events go to stderr. `RUST_LOG` wins over the `-v`/`-q` derived level.

use crate::config::CliConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting the log format (`compact` or `json`)
pub const LOG_FORMAT_ENV: &str = "BOARDCHECK_LOG_FORMAT";

/// Filter from `RUST_LOG`, else from the configured verbosity
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_directive()))
}

/// Install the global subscriber
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init_tracing(config: &CliConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));
    let format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());

    let _ = match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(config.color.should_color())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };
}
