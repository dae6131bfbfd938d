//! File logging.
//!
//! The terminal belongs to the UI, so log output goes only to
//! `<log_dir>/peacemap.log`, truncated at the start of each session.
//! Filtering follows `RUST_LOG` and defaults to `info`.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "peacemap.log";

/// Keeps the non-blocking writer alive; dropping it flushes the log.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Create `log_dir`, clear the previous session's file and install the
/// global subscriber.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn prepare_log_file(log_dir: &Path, log_file: &str) -> io::Result<()> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_log_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("peacemap_logs_{tag}_{nanos}"))
    }

    // The global subscriber can only be installed once per process, so only
    // the file preparation is exercised here.
    #[test]
    fn test_creates_directory_and_empty_file() {
        let dir = test_log_dir("create");
        prepare_log_file(&dir, "test.log").unwrap();
        assert_eq!(fs::read_to_string(dir.join("test.log")).unwrap(), "");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_truncates_previous_session() {
        let dir = test_log_dir("truncate");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("test.log"), "old session").unwrap();
        prepare_log_file(&dir, "test.log").unwrap();
        assert_eq!(fs::read_to_string(dir.join("test.log")).unwrap(), "");
        fs::remove_dir_all(&dir).unwrap();
    }
}
