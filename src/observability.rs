//! Logging setup.
//!
//! Events go to a daily rolling file so the terminal UI is never drawn over.
//! Call [`init_logging`] once near process start; later calls are no-ops and
//! simply return the resolved log file path.

use crate::config::LoggingConfig;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const APP_NAME: &str = "sitebrief";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("tracing setup failed: {0}")]
    Init(String),
}

/// Install the global subscriber and return the path of today's log file
pub fn init_logging(config: &LoggingConfig) -> Result<PathBuf, LoggingError> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = resolve_log_dir(config.dir.as_deref());
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let file_name = format!("{APP_NAME}.log");
    let full_path = dir.join(daily_file_name(&file_name, Utc::now()));

    let appender = rolling::daily(&dir, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

/// Name of the file `rolling::daily` writes to; it rotates on UTC dates
fn daily_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{prefix}.{}", now.format("%Y-%m-%d"))
}

fn resolve_log_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    dirs::data_local_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_the_utc_date() {
        let late_evening_in_new_york = DateTime::parse_from_rfc3339("2026-03-01T21:30:00-05:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            daily_file_name("sitebrief.log", late_evening_in_new_york),
            "sitebrief.log.2026-03-02"
        );
    }

    #[test]
    fn explicit_dir_wins() {
        let dir = PathBuf::from("/tmp/sitebrief-logs");
        assert_eq!(resolve_log_dir(Some(&dir)), dir);
    }

    #[test]
    fn default_dir_is_named_after_the_app() {
        assert!(resolve_log_dir(None).ends_with(APP_NAME));
    }
}
