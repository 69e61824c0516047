//! File logging.
//!
//! The TUI owns stdout, so logs go to `<data dir>/logs/parley.log`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LOG_ENV;

const LOG_FILE: &str = "parley.log";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber writing to `logs_dir`.
///
/// Returns `None` when the directory cannot be created; the app then runs
/// without logs. Hold the guard until exit so buffered lines are flushed.
pub fn init_logging(logs_dir: &Path, log_level: Option<&str>) -> Option<WorkerGuard> {
    std::fs::create_dir_all(logs_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(build_env_filter(log_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        );

    let _ = tracing::subscriber::set_global_default(subscriber);
    Some(guard)
}

/// Precedence: CLI flag, then `PARLEY_LOG`, then `info`. Invalid directives are skipped.
pub fn build_env_filter(log_level: Option<&str>) -> EnvFilter {
    if let Some(filter) = log_level.and_then(|level| EnvFilter::try_new(level).ok()) {
        return filter;
    }
    if let Some(filter) = std::env::var(LOG_ENV)
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
    {
        return filter;
    }
    EnvFilter::new(DEFAULT_FILTER)
}
