//! Logging setup: stderr plus a daily rolling file under `<data dir>/logs`.

use anyhow::{Context, Result};
use roost_infrastructure::RoostPaths;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
///
/// Falls back to stderr only when the logs directory is unavailable. Keep the
/// returned guard alive until exit or buffered file lines are lost.
pub fn init(default_level: &str, paths: &RoostPaths) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    let Some(logs_dir) = usable_logs_dir(paths) else {
        registry
            .try_init()
            .context("Failed to install tracing subscriber")?;
        tracing::warn!("[Logging] No writable logs directory, logging to stderr only");
        return Ok(None);
    };

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "roost.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    registry
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(Some(guard))
}

fn usable_logs_dir(paths: &RoostPaths) -> Option<PathBuf> {
    let logs_dir = paths.logs_dir().ok()?;
    std::fs::create_dir_all(&logs_dir).ok()?;
    Some(logs_dir)
}
