//! Tracing setup: subscriber installation, span macros, and structured events.

pub mod events;
pub mod spans;

use tracing_subscriber::EnvFilter;

use augur_core::config::ObservabilityConfig;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "AUGUR_LOG";

/// Install the global subscriber. `AUGUR_LOG` wins over the configured level.
/// Logs go to stderr so stdout stays clean for JSON results.
/// Calling this twice is a no-op.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
}
