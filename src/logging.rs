use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file name inside the flow directory
pub const LOG_FILE_NAME: &str = "flow.log";

/// Route tracing output to `<dir>/flow.log`, since the TUI owns the terminal.
///
/// `RUST_LOG` overrides the configured filter. Keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(dir: &Path, default_filter: &str) -> Result<WorkerGuard> {
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("flow=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}
