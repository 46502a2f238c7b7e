//! Logging Setup
//!
//! Installs the global `tracing` subscriber from a [`LoggingConfig`].
//! `RUST_LOG` wins over the configured level when set.

use std::fs::OpenOptions;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {error}")]
    File { path: String, error: std::io::Error },

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Subscriber already installed: {0}")]
    Init(String),
}

/// Build the default filter directives for a level
pub fn default_directives(level: &str) -> String {
    format!(
        "iprescribe={level},iprescribe_mock_api={level},tower_http={level}",
        level = level
    )
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(&config.level))
            .map_err(|e| LoggingError::Filter(e.to_string()))?,
    };

    let writer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|error| LoggingError::File {
                    path: path.clone(),
                    error,
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(config.file.is_none());

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.format == "json" {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let directives = default_directives("debug");
        assert!(directives.contains("iprescribe=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }

    #[test]
    fn test_unwritable_log_file() {
        let config = LoggingConfig {
            file: Some("/nonexistent-dir/iprescribe/admin.log".to_string()),
            ..Default::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::File { .. })));
    }
}
