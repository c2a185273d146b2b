//! Tracing setup for the analyzer client.
//!
//! Every launch writes its own `nagar_<timestamp>.log` under `.nagar/logs`
//! and mirrors it to stdout. The `[logging]` config table sets the default
//! level and how many launch logs are kept; `RUST_LOG` overrides the level.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};
use crate::config::LoggingSettings;

const LOG_FILE_PREFIX: &str = "nagar_";
const LOG_FILE_EXTENSION: &str = "log";
/// Dependencies held at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &[&str] = &[
    "ureq", "rustls", "eframe", "egui_glow", "egui_winit", "winit", "wgpu_core", "naga",
];
const FILE_STAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

type LineTimer = fmt::time::OffsetTime<&'static [BorrowedFormatItem<'static>]>;

static ACTIVE_LOG: OnceLock<(WorkerGuard, PathBuf)> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The `.nagar/logs` directory could not be resolved or created.
    #[error(transparent)]
    Dirs(#[from] AppDirError),
    /// The launch timestamp could not be formatted into a file name.
    #[error("Failed to format log file timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// The log file for this launch could not be opened.
    #[error("Failed to open log file in {dir}: {source}")]
    OpenFile {
        /// Directory the launch log was meant to live in.
        dir: PathBuf,
        /// Appender error.
        source: InitError,
    },
    /// An older launch log could not be listed or removed.
    #[error("Failed to prune old log files at {path}: {source}")]
    Prune {
        /// Directory or file that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Another global subscriber is already installed.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber and return this launch's log file path.
///
/// Later calls return the same path without touching the subscriber.
pub fn init(settings: &LoggingSettings) -> Result<PathBuf, LoggingError> {
    if let Some((_, path)) = ACTIVE_LOG.get() {
        return Ok(path.clone());
    }

    let log_dir = app_dirs::logs_dir()?;
    let stem = launch_log_stem(now_local_or_utc())?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(stem.as_str())
        .filename_suffix(LOG_FILE_EXTENSION)
        .build(&log_dir)
        .map_err(|source| LoggingError::OpenFile {
            dir: log_dir.clone(),
            source,
        })?;
    let log_path = log_dir.join(format!("{stem}.{LOG_FILE_EXTENSION}"));
    let removed = prune_launch_logs(&log_dir, settings.max_files)?;

    let (file_writer, guard) = tracing_appender::non_blocking(appender);
    let filter = choose_filter(std::env::var("RUST_LOG").ok(), &settings.level);
    let timer = line_timer();
    let subscriber = Registry::default()
        .with(filter.filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_thread_names(true)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = ACTIVE_LOG.set((guard, log_path.clone()));

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        filter = %filter.description,
        pruned = removed,
        "Logging to {}",
        log_path.display()
    );
    if let Some(level) = filter.rejected_level {
        tracing::warn!("Ignoring invalid [logging] level {level:?}; using \"info\"");
    }
    Ok(log_path)
}

struct FilterChoice {
    filter: EnvFilter,
    description: String,
    rejected_level: Option<String>,
}

fn choose_filter(rust_log: Option<String>, level: &str) -> FilterChoice {
    if let Some(directives) = rust_log.filter(|value| !value.trim().is_empty())
        && let Ok(filter) = EnvFilter::try_new(&directives)
    {
        return FilterChoice {
            filter,
            description: format!("RUST_LOG={directives}"),
            rejected_level: None,
        };
    }
    let directives = filter_directives(level);
    match EnvFilter::try_new(&directives) {
        Ok(filter) => FilterChoice {
            filter,
            description: directives,
            rejected_level: None,
        },
        Err(_) => {
            let fallback = filter_directives("info");
            FilterChoice {
                filter: EnvFilter::new(&fallback),
                description: fallback,
                rejected_level: Some(level.to_string()),
            }
        }
    }
}

fn filter_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.trim().to_string(), |acc, target| format!("{acc},{target}=warn"))
}

/// `nagar_<timestamp>`; the appender adds the `.log` extension.
fn launch_log_stem(started: OffsetDateTime) -> Result<String, LoggingError> {
    let stamp = started.format(FILE_STAMP)?;
    Ok(format!("{LOG_FILE_PREFIX}{stamp}"))
}

/// Remove the oldest launch logs so at most `keep` remain; returns how many went.
///
/// Launch log names embed a sortable timestamp, so name order is launch order.
/// Other files in the directory are left alone.
fn prune_launch_logs(dir: &Path, keep: usize) -> Result<usize, LoggingError> {
    let mut launches = fs::read_dir(dir)
        .map_err(|source| LoggingError::Prune {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_launch_log(path))
        .collect::<Vec<_>>();
    launches.sort();
    let excess = launches.len().saturating_sub(keep);
    for path in launches.drain(..excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::Prune { path, source })?;
    }
    Ok(excess)
}

fn is_launch_log(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|ext| ext.to_str()) == Some(LOG_FILE_EXTENSION)
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX))
}

fn line_timer() -> LineTimer {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, LINE_TIME)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn launch_log_names_sort_in_launch_order() {
        let first = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let later = OffsetDateTime::from_unix_timestamp(1_700_000_000 + 3_600 * 30).unwrap();
        let first_stem = launch_log_stem(first).unwrap();
        assert_eq!(first_stem, "nagar_2023-11-14_22-13-20");
        assert!(first_stem < launch_log_stem(later).unwrap());
    }

    #[test]
    fn prune_keeps_newest_launch_logs_only() {
        let dir = tempdir().unwrap();
        for day in 1..=5 {
            fs::write(dir.path().join(format!("nagar_2024-01-0{day}_08-00-00.log")), "").unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        fs::write(dir.path().join("crash.log"), "keep").unwrap();

        let removed = prune_launch_logs(dir.path(), 2).unwrap();

        assert_eq!(removed, 3);
        let mut remaining = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        remaining.sort();
        assert_eq!(
            remaining,
            vec![
                "crash.log",
                "nagar_2024-01-04_08-00-00.log",
                "nagar_2024-01-05_08-00-00.log",
                "notes.txt",
            ]
        );
    }

    #[test]
    fn prune_under_limit_removes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("nagar_2024-01-01_08-00-00.log"), "").unwrap();
        assert_eq!(prune_launch_logs(dir.path(), 10).unwrap(), 0);
    }

    #[test]
    fn configured_level_keeps_dependencies_quiet() {
        let choice = choose_filter(None, "nagar=debug");
        assert!(choice.rejected_level.is_none());
        assert!(choice.description.starts_with("nagar=debug,"));
        assert!(choice.description.contains("ureq=warn"));
    }

    #[test]
    fn invalid_level_falls_back_to_info() {
        let choice = choose_filter(None, "nagar=loud");
        assert_eq!(choice.rejected_level.as_deref(), Some("nagar=loud"));
        assert!(choice.description.starts_with("info,"));
    }

    #[test]
    fn rust_log_wins_over_config() {
        let choice = choose_filter(Some("trace".into()), "warn");
        assert_eq!(choice.description, "RUST_LOG=trace");

        let blank = choose_filter(Some("  ".into()), "warn");
        assert!(blank.description.starts_with("warn,"));
    }
}
