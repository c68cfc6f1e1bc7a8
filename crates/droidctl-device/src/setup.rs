//! Config loading.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::config::Config;
use crate::error::DeviceError;

/// Load configuration from the given path, or the default location.
pub fn load_config(path: Option<&str>) -> Result<Config, DeviceError> {
    load_config_as(path)
}

/// Load any config shape that extends [`Config`] with extra sections.
pub fn load_config_as<T>(path: Option<&str>) -> Result<T, DeviceError>
where
    T: DeserializeOwned + Default,
{
    let config_path = match path {
        Some(p) => PathBuf::from(p),
        None => default_config_path(),
    };

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| DeviceError::Config(format!("failed to read config: {e}")))?;
        let config: T = toml::from_str(&content)
            .map_err(|e| DeviceError::Config(format!("failed to parse config: {e}")))?;
        info!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        info!(path = %config_path.display(), "no config file found, using defaults");
        Ok(T::default())
    }
}

/// Get the default config directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("droidctl")
}

/// Get the default config file path.
fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}
