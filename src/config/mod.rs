//! Settings file handling for the analyzer client.

use crate::app_dirs;

mod errors;
mod load;
mod save;
mod types;


/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the configured endpoint for one launch.
pub const ENDPOINT_ENV: &str = "NAGAR_ANALYZE_URL";

pub use errors::ConfigError;
pub use load::{config_path, load_or_default, validate_endpoint};
pub use types::{AnalysisSettings, AppSettings, LoggingSettings};

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
