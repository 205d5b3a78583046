//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::error::{Result, TlsError};
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| TlsError::config(format!("invalid log level '{}': {}", config.level, e))),
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stdout, and additionally to `log_file_path` when `log_to_file` is set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = filter(config)?;

    if config.log_to_file {
        let file = std::fs::File::create(&config.log_file_path)?;
        let file_layer = fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        let stdout_layer = fmt::layer().with_file(true).with_line_number(true);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(stdout_layer)
            .try_init()
            .map_err(|e| TlsError::config(format!("failed to initialize logging: {e}")))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .map_err(|e| TlsError::config(format!("failed to initialize logging: {e}")))
    }
}
