//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies. Output
//! goes to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;

/// Install the global subscriber. Safe to call more than once; later calls are
/// ignored.
pub fn init(logging: &LoggingSection, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
