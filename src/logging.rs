//! Logging utilities wrapping `tracing` initialisation
//!
//! Console output goes to stderr without timestamps; stdout is reserved for
//! the confirmation line. An optional file sink records timestamped lines.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Install the global tracing subscriber described by `options`.
///
/// Returns the file writer's guard when a log file is configured; hold it
/// until exit so buffered lines are flushed. Does nothing if a subscriber
/// is already installed.
pub fn init(options: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let level = options.level.as_str();
    let filter = EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))?;

    let (file_layer, guard) = match options.file.as_deref() {
        Some(path) => {
            let (writer, guard) = file_writer(path, options.rotation)?;
            let layer = fmt::layer()
                .with_timer(UtcTime::rfc_3339())
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = fmt::layer()
        .without_time()
        .with_writer(io::stderr)
        .with_ansi(options.color)
        .with_target(false);

    Registry::default()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

fn file_writer(path: &Path, rotation: Option<LogRotation>) -> Result<(NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let Some(rotation) = rotation else {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| Error::Config(format!("Failed to open log file {}: {e}", path.display())))?;
        return Ok(tracing_appender::non_blocking(file));
    };

    let file_name = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Log file path '{}' must include a filename when rotation is enabled",
            path.display()
        ))
    })?;
    let appender = match rotation {
        LogRotation::Hourly => rolling::hourly(dir, file_name),
        LogRotation::Daily => rolling::daily(dir, file_name),
    };

    Ok(tracing_appender::non_blocking(appender))
}
