#![forbid(unsafe_code)]

//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` fmt subscriber writing to stderr.
//! The filter comes from `HENU_LOG` when set, otherwise from
//! [`LoggingConfig::filter`].

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Result, RuntimeError};

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "HENU_LOG";

/// Build the filter for `config`, honoring [`LOG_ENV`].
pub fn filter_for(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = match std::env::var(LOG_ENV) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => config.filter.clone(),
    };
    EnvFilter::try_new(&directives)
        .map_err(|error| RuntimeError::invalid(format!("log filter {directives:?}: {error}")))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept.
pub fn init(config: &LoggingConfig) -> Result<bool> {
    let filter = filter_for(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .is_ok();
    if installed {
        tracing::debug!(format = ?config.format, "logging initialized");
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_first_subscriber() {
        let config = LoggingConfig {
            filter: "warn".into(),
            format: LogFormat::Compact,
        };
        init(&config).unwrap();
        assert!(!init(&config).unwrap());
    }
}
