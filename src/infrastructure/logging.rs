// src/infrastructure/logging.rs
//
// File logging backend plus the reader behind the "read logs" action.
// Call sites use the `log` facade; installing the subscriber also installs
// the `log` -> `tracing` bridge so those records land in `log.txt`.

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{AppError, AppResult};

pub const LOG_FILE_NAME: &str = "log.txt";

/// Directive used when `RUST_LOG` is unset or invalid
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Open (or create) the log file in append mode
fn open_log_file(path: &Path) -> AppResult<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn file_subscriber(file: File, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false),
    )
}

/// Install the global subscriber writing to `path`. Fails if one is already set.
pub fn init_file_logging(path: &Path) -> AppResult<()> {
    let file = open_log_file(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    file_subscriber(file, filter)
        .try_init()
        .map_err(|e| AppError::Other(format!("Logger already installed: {}", e)))
}

/// Whole log file as text; empty when nothing was logged yet
pub fn read_logs(path: &Path) -> AppResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(AppError::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_appends_enabled_events() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join(LOG_FILE_NAME);
        let file = open_log_file(&path).unwrap();
        let subscriber = file_subscriber(file, EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("ledger recovered");
            tracing::debug!("page fetched");
        });

        let logs = read_logs(&path).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("ledger recovered"));
        assert!(!logs.contains("page fetched"));
        assert!(!logs.contains('\u{1b}'), "file output must not carry ANSI escapes");
    }

    #[test]
    fn test_open_appends_to_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, "earlier session\n").unwrap();

        let subscriber = file_subscriber(open_log_file(&path).unwrap(), EnvFilter::new("info"));
        tracing::subscriber::with_default(subscriber, || tracing::info!("next session"));

        let logs = read_logs(&path).unwrap();
        assert!(logs.starts_with("earlier session\n"));
        assert!(logs.contains("next session"));
    }

    #[test]
    fn test_read_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_logs(&dir.path().join(LOG_FILE_NAME)).unwrap(), "");
    }
}
