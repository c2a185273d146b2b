use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::errors::ConfigError;
use super::save::save_settings_to_path;
use super::types::AppSettings;
use super::{CONFIG_FILE_NAME, ENDPOINT_ENV, map_app_dir_error};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, writing defaults on first launch.
///
/// `NAGAR_ANALYZE_URL` replaces the configured endpoint for this process only;
/// the override is never written back.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    let settings = if path.exists() {
        load_settings_from(&path)?
    } else {
        let settings = AppSettings::default();
        save_settings_to_path(&settings, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        settings
    };
    let settings = apply_endpoint_override(settings, std::env::var(ENDPOINT_ENV).ok());
    validate_endpoint(&settings.analysis.endpoint)?;
    tracing::info!(
        endpoint = %settings.analysis.endpoint,
        "Loaded config from {}",
        path.display()
    );
    Ok(settings)
}

/// Check that an endpoint parses as an http(s) URL.
pub fn validate_endpoint(endpoint: &str) -> Result<url::Url, ConfigError> {
    let parsed = url::Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ConfigError::UnsupportedScheme {
            endpoint: endpoint.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

pub(super) fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}

pub(super) fn apply_endpoint_override(
    mut settings: AppSettings,
    endpoint: Option<String>,
) -> AppSettings {
    if let Some(endpoint) = endpoint.map(|value| value.trim().to_string())
        && !endpoint.is_empty()
    {
        tracing::info!("Using analysis endpoint from {ENDPOINT_ENV}");
        settings.analysis.endpoint = endpoint;
    }
    settings
}
