//! Logging system initialization
//!
//! Sets up the tracing subscriber from the `[logging]` configuration
//! section.
//!
//! **Note**: Call once during startup, after the configuration has been
//! loaded. A second call panics because the global subscriber is already
//! set.

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(config.level.clone());

    let subscriber_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true);

    if config.format == "json" {
        subscriber_builder.json().init();
    } else {
        subscriber_builder.init();
    }
}
