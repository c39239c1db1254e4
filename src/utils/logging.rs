//! Diagnostic logging.
//!
//! The terminal UI owns stdout, so diagnostics only go to a file and only
//! when `--log <FILE>` is passed. Without it no subscriber is installed and
//! every `tracing` macro is a no-op.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_DIRECTIVE: &str = "gemchat=debug";

fn open_log_file(path: &Path) -> Result<File, Box<dyn Error>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Cannot open log file {}: {e}", path.display()))?;
    Ok(file)
}

/// `RUST_LOG` wins over the built-in directive when set.
pub fn build_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

pub fn init_file_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = open_log_file(path)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(build_filter())
        .with(file_layer)
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_file_is_created() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("gemchat.log");

        init_file_logging(&path).expect("init logging");

        assert!(path.exists());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let dir = TempDir::new().expect("temp dir");

        let err = open_log_file(dir.path()).unwrap_err();

        assert!(err.to_string().starts_with("Cannot open log file"));
    }
}
