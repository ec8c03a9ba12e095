//! Configuration types for ckan-import components.
//!
//! Command-line flags always win. Values missing on the command line fall
//! back to an optional TOML file and then to the defaults defined here.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Visibility;

/// HTTP client configuration for CKAN API calls.
pub struct HttpConfig {
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Defaults read from `config.toml`.
///
/// # Example
///
/// ```toml
/// ckan_base_url = "http://myckan.site/"
/// owner_org = "my-org"
/// private = "False"
/// exts_upload = [".pdf", ".csv"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDefaults {
    pub ckan_base_url: Option<String>,
    pub owner_org: Option<String>,
    pub private: Option<Visibility>,
    pub exts_upload: Option<Vec<String>>,
}

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the default configuration directory path: `~/.config/ckan-import/`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ckan-import"))
}

/// Returns the default configuration file path.
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join(CONFIG_FILE_NAME))
}

/// Load import defaults from a TOML file.
///
/// # Returns
/// * `Ok(Some(defaults))` - File loaded successfully
/// * `Ok(None)` - No `path` given and no file at the default location
/// * `Err(e)` - An explicit `path` is missing, or the file is invalid
pub fn load_import_defaults(path: Option<PathBuf>) -> Result<Option<ImportDefaults>, AppError> {
    let using_default_path = path.is_none();
    let config_path = match path {
        Some(p) => p,
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    if !config_path.exists() {
        if using_default_path {
            tracing::debug!("No config file at {}", config_path.display());
            return Ok(None);
        }
        return Err(AppError::ConfigError(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        AppError::ConfigError(format!(
            "Failed to read config file '{}': {}",
            config_path.display(),
            e
        ))
    })?;

    let defaults: ImportDefaults = toml::from_str(&content).map_err(|e| {
        AppError::ConfigError(format!(
            "Invalid TOML in '{}': {}",
            config_path.display(),
            e
        ))
    })?;

    tracing::debug!("Loaded defaults from {}", config_path.display());
    Ok(Some(defaults))
}

/// Ensures the CKAN base URL ends with `/` so action paths join under it.
///
/// ```
/// use ckan_import_core::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://myckan.site"), "http://myckan.site/");
/// assert_eq!(normalize_base_url("http://myckan.site/ckan/"), "http://myckan.site/ckan/");
/// ```
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
