// src/logging.rs

//! Structured logging setup
//!
//! Installs a global `tracing` subscriber with a console layer and an optional
//! daily-rolling file layer. `RUST_LOG` takes precedence over the configured
//! level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::Identity;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{Error, ErrorKind, Result, ResultExt};

/// Keeps the non-blocking file writer alive; drop it to flush on shutdown.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _guards: Vec<WorkerGuard>,
}

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|e| {
            Error::new(
                ErrorKind::Configuration {
                    key: Some("logging.level".to_string()),
                    validation_errors: vec![e.to_string()],
                },
                format!("Invalid log level '{}'", level),
            )
        }),
    }
}

/// Installs the global subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut guard = LoggingGuard::default();
    let filter = build_filter(&config.level)?;

    let registry = Registry::default().with(filter);

    let registry = if config.console.enabled {
        let console_layer = fmt::layer()
            .with_ansi(config.console.colored)
            .with_target(true);
        let console_layer = match config.format {
            LogFormat::Json => console_layer.json().boxed(),
            LogFormat::Pretty => console_layer.pretty().boxed(),
            LogFormat::Compact => console_layer.compact().boxed(),
        };
        registry.with(console_layer)
    } else {
        registry.with(Identity::new().boxed())
    };

    let registry = if let Some(file_config) = &config.file {
        let directory = file_config
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(directory)
            .with_context(|| format!("Failed to create log directory: {}", directory.display()))?;

        let file_name = file_config
            .path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("kitchen-ops.log"));
        let file_appender = tracing_appender::rolling::daily(directory, file_name);
        let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
        guard._guards.push(worker);

        let file_layer = fmt::layer().with_ansi(false).with_writer(non_blocking);
        let file_layer = match config.format {
            LogFormat::Json => file_layer.json().boxed(),
            LogFormat::Pretty => file_layer.pretty().boxed(),
            LogFormat::Compact => file_layer.compact().boxed(),
        };
        registry.with(file_layer)
    } else {
        registry.with(Identity::new().boxed())
    };

    registry
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install log subscriber: {}", e)))?;

    tracing::debug!(level = %config.level, format = ?config.format, "logging initialised");
    Ok(guard)
}
