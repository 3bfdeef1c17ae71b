//! Logging setup on top of `tracing`.
//!
//! The terminal belongs to the UI, so everything goes to a daily rotated file
//! under the local data directory. `RUST_LOG` overrides the default filter.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "lazyambar=info,warn";

/// File name prefix of the rotated log files.
const LOG_FILE_PREFIX: &str = "lazyambar.log";

/// Install the global subscriber.
///
/// Logs land in:
/// - Linux: `~/.local/share/lazyambar/logs/`
/// - macOS: `~/Library/Application Support/lazyambar/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\lazyambar\logs\`
///
/// Use `RUST_LOG=lazyambar=debug` to see every dispatched request.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a global subscriber is
/// already installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(env_filter());

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lazyambar starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("lazyambar").join("logs"))
}

/// Where log files are written, for display in the help screen.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log a clean shutdown.
pub fn shutdown() {
    tracing::info!("lazyambar shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_directory_layout() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("lazyambar/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_default_filter() {
        std::env::set_var("RUST_LOG", "lazyambar=trace");
        let filter = env_filter().to_string();
        std::env::remove_var("RUST_LOG");
        assert!(filter.contains("lazyambar=trace"));
    }

    #[test]
    #[serial]
    fn test_default_filter_without_rust_log() {
        std::env::remove_var("RUST_LOG");
        assert!(env_filter().to_string().contains("lazyambar=info"));
    }
}
