//! Log initialization. The TUI owns the terminal for the whole session, so
//! everything goes to a file under the application data directory instead of
//! stdout. `RUST_LOG` overrides the default `info` filter.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::db::data_dir;

const LOG_FILE_NAME: &str = "daisy-library.log";

/// Install the global tracing subscriber. The returned guard must stay alive
/// in `main` so buffered log lines are flushed on exit.
pub fn init() -> Result<WorkerGuard> {
    let log_dir = data_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir).context("failed to create log directory")?;

    let file_appender = rolling::daily(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
