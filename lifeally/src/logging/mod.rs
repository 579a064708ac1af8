//! Structured logging for Lifeally.
//!
//! A thin layer over `tracing-subscriber`: one formatting layer for stdout and
//! optionally one for a non-blocking log file, both behind a level filter.

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::Path;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Keeps the file writer flushing for the life of the process.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup, usually because one is already installed
    #[error("Subscriber error: {0}")]
    SubscriberError(String),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the global subscriber from the given configuration.
///
/// Returns `SubscriberError` when a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.stdout {
        layers.push(format_layer(&config.format, std::io::stdout, true));
    }

    let mut guard = None;
    if let Some(file_path) = &config.file {
        let (writer, file_guard) = create_non_blocking_file(file_path)?;
        layers.push(format_layer(&config.format, writer, false));
        guard = Some(file_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(level_filter(&config.level))
        .try_init()
        .map_err(|e| LogError::SubscriberError(e.to_string()))?;

    if let Some(guard) = guard {
        let _ = FILE_GUARD.set(guard);
    }

    Ok(())
}

/// Level filter for the configured level. SurrealDB internals stay at `warn`
/// unless the level is already that quiet.
fn level_filter(level: &LogLevel) -> EnvFilter {
    let directive = match level {
        LogLevel::Trace | LogLevel::Debug | LogLevel::Info => {
            format!("{},surrealdb=warn,surrealdb_core=warn", level)
        }
        LogLevel::Warn | LogLevel::Error => level.to_string(),
    };
    EnvFilter::new(directive)
}

fn format_layer<W>(format: &LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Default => layer.boxed(),
    }
}

/// Create a non-blocking file writer, creating parent directories as needed.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<(NonBlocking, WorkerGuard)> {
    let path = path.as_ref();

    let file_name = path.file_name().ok_or_else(|| {
        LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Log file path has no file name: {}", path.display()),
        ))
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(file_appender))
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse::<LogLevel>()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}
