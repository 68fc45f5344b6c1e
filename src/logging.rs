use crate::paths;
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging to a file under the data directory.
///
/// The terminal belongs to the TUI, so nothing is ever written to
/// stdout/stderr; panel failures stay silent on screen and show up here
/// at warn level instead.
pub fn init_logging() -> Result<()> {
    let logs_dir = paths::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let log_file = logs_dir.join("arialog.log");

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_writer(file)
        .with_ansi(false);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized. Log file: {}", log_file.display());

    Ok(())
}
