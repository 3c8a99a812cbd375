//! Logging setup.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging with the given level.
///
/// Console output goes to stderr so report output on stdout stays clean.
/// When `file` is set, a second layer appends plain-text (or JSON) records
/// to it; the returned guard must live until shutdown to flush them.
pub fn setup_logging(level: &str, json: bool, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    let console = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().pretty().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir.unwrap_or(Path::new(".")), name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let layer = if json {
                fmt::layer().json().with_writer(writer).with_ansi(false).boxed()
            } else {
                fmt::layer().with_writer(writer).with_ansi(false).boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}
