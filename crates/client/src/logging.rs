//! File logging for the terminal client.
//!
//! The UI owns stdout, so every log line goes to `qquest.log` under the
//! platform cache directory (or `QQUEST_LOG_DIR`).
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "qquest.log";

/// Directives used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,qquest=debug,game_core=debug,game_content=debug"
    } else {
        "info"
    }
}

pub fn setup_logging(override_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let log_dir = override_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_directory);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // The writer thread must outlive main's stack frame.
    std::mem::forget(guard);

    tracing::info!(verbose, "Log file: {}", log_dir.join(LOG_FILE).display());
    Ok(())
}

fn default_log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "qquest")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("qquest").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_raises_workspace_crates_only() {
        assert_eq!(default_directives(false), "info");
        let verbose = default_directives(true);
        assert!(verbose.starts_with("info,"));
        assert!(verbose.contains("game_core=debug"));
    }

    #[test]
    fn log_file_is_created_in_override_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");

        setup_logging(Some(&log_dir), true).unwrap();

        assert!(log_dir.join(LOG_FILE).is_file());
    }
}
