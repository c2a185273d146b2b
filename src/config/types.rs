use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis_api::DEFAULT_ENDPOINT;
use crate::http_client::HttpTimeouts;

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 600;
const WRITE_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_FILES_LIMIT: usize = 100;

/// Settings persisted in `config.toml`.
///
/// Config keys (TOML): `[analysis]` table, see [`AnalysisSettings`];
/// `[logging]` table, see [`LoggingSettings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Analysis endpoint and HTTP timeouts.
    #[serde(default)]
    pub analysis: AnalysisSettings,
    /// Log verbosity and retention.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppSettings {
    pub(crate) fn normalized(self) -> Self {
        Self {
            analysis: self.analysis.normalized(),
            logging: self.logging.normalized(),
        }
    }
}

/// Where and how the analysis request is sent.
///
/// Config keys: `endpoint`, `connect_timeout_secs`, `read_timeout_secs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Full URL of the analysis endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds; the backend may take a while to answer.
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

impl AnalysisSettings {
    /// Timeouts for the HTTP agent built from these settings.
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            read: Duration::from_secs(self.read_timeout_secs),
            write: Duration::from_secs(WRITE_TIMEOUT_SECS),
        }
    }

    pub(crate) fn normalized(self) -> Self {
        let endpoint = self.endpoint.trim();
        Self {
            endpoint: if endpoint.is_empty() {
                default_endpoint()
            } else {
                endpoint.to_string()
            },
            connect_timeout_secs: clamp_timeout(self.connect_timeout_secs),
            read_timeout_secs: clamp_timeout(self.read_timeout_secs),
        }
    }
}

/// Log verbosity and how many per-launch log files are kept.
///
/// Config keys: `level`, `max_files`. `RUST_LOG` still wins over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default `tracing` level or directive list, e.g. `"info"` or `"nagar=debug"`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Newest log files kept in `.nagar/logs`; older ones are removed at startup.
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

impl LoggingSettings {
    pub(crate) fn normalized(self) -> Self {
        let level = self.level.trim();
        Self {
            level: if level.is_empty() {
                default_log_level()
            } else {
                level.to_string()
            },
            max_files: self.max_files.clamp(1, MAX_LOG_FILES_LIMIT),
        }
    }
}

fn clamp_timeout(secs: u64) -> u64 {
    secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS)
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    10
}
