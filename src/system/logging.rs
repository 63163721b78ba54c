//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration. Console logs go to stderr so they
//! never interleave with the lookup report on stdout.

use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{LookupError, Result};

/// Initialize logging system based on configuration
///
/// **Note**: This should be called only once during application startup,
/// after the configuration has been loaded.
///
/// # Arguments
/// * `config` - Logging settings
/// * `level_override` - Optional filter taking precedence over `config.level`
///   (e.g. from `--log-level`)
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(
    config: &LoggingConfig,
    level_override: Option<&str>,
) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.enable_rotation => {
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("nwo-lookup.log");
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
                .map_err(|e| LookupError::file_operation(format!("log appender: {}", e)))?;
            Box::new(appender)
        }
        Some(log_file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Box::new(file)
        }
        None => Box::new(std::io::stderr()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let level = level_override.unwrap_or(&config.level);
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .map_err(|e| LookupError::config(format!("invalid log level '{}': {}", level, e)))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let init = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    init.map_err(|e| LookupError::runtime(format!("logging already initialized: {}", e)))?;

    Ok(guard)
}
