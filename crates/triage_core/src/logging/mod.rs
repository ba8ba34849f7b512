//! Logging infrastructure for Triage Desk.
//!
//! Application logs go through `tracing`. The subscriber writes to stderr
//! and, when enabled, to a daily rolling file in the configured logs folder.

mod types;

pub use types::{LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_PREFIX: &str = "triage-desk.log";

/// Initialize global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG` and falls back to `default_level`. Output goes to
/// stderr. Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(build_filter(default_level))
        .try_init();
}

/// Like [`init_tracing`], plus a daily rolling file under `logs_dir`.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program. Returns `None` if the directory cannot be
/// created, in which case only stderr logging is installed.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        init_tracing(default_level);
        tracing::warn!("Cannot create logs folder {}: {}", logs_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(build_filter(default_level))
        .try_init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn build_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
        assert_eq!(LogLevel::Error.as_filter_str(), "error");
    }

    #[test]
    fn prefixes_format_activity_lines() {
        assert_eq!(
            MessagePrefix::Success.format("Classified 4 tickets"),
            "[SUCCESS] Classified 4 tickets"
        );
        assert_eq!(MessagePrefix::Request.format("POST /classify"), "-> POST /classify");
        assert_eq!(MessagePrefix::None.format("plain"), "plain");
    }

    #[test]
    fn log_level_serializes_lowercase() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
    }
}
