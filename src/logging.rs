//! Logging setup for statboard.
//!
//! Logs go to the console and to daily rolling files in the app data
//! directory. `RUST_LOG` overrides the default `info` level.
//!
//! ```no_run
//! statboard::logging::init().expect("Failed to initialize logging");
//! tracing::info!("App started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const LOG_PREFIX: &str = "statboard";
const MAX_LOG_FILES: usize = 10;

/// Platform log directory:
///
/// - Windows: `%APPDATA%/statboard/logs`
/// - macOS: `~/Library/Application Support/statboard/logs`
/// - Linux: `~/.local/share/statboard/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("statboard").join("logs");

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

fn env_filter(default: &str) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .context("Failed to create env filter")
}

/// Console output plus two rolling files: `statboard.*.log` with everything
/// and `error.*.log` with warnings and errors only.
///
/// # Errors
///
/// Fails when the log directory or a file appender cannot be created, or
/// when a global subscriber is already installed.
pub fn init() -> Result<()> {
    let log_dir = get_log_dir()?;

    let all_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create all-logs file appender")?;

    let error_logs_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix("error")
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create error-logs file appender")?;

    // Console output goes to stderr so the CLI report on stdout stays clean.
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .pretty();

    let all_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(all_logs_appender);

    let error_logs_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(error_logs_appender)
        .with_filter(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter("info")?)
        .with(stderr_layer)
        .with(all_logs_layer)
        .with(error_logs_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    tracing::info!(log_dir = %log_dir.display(), "Logging initialized");
    Ok(())
}

/// Console-only logging for when the data directory is unavailable.
pub fn init_console() -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter("warn")?)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .context("Failed to install the tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir() {
        let Ok(log_dir) = get_log_dir() else {
            // No data directory in this environment.
            return;
        };
        assert!(log_dir.ends_with("statboard/logs") || log_dir.ends_with("statboard\\logs"));
    }
}
