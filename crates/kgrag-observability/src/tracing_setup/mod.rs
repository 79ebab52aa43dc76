//! Tracing setup: subscriber installation plus span and event helpers.

pub mod events;
pub mod spans;

use kgrag_core::config::ObservabilityConfig;
use kgrag_core::constants::LOG_ENV_VAR;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `KGRAG_LOG` takes precedence over the configured level. Returns `false`
/// if a subscriber was already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}

/// Install a subscriber with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init()
        .is_ok()
}
