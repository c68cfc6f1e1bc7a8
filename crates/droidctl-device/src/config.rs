//! Configuration loaded from TOML.

use droidctl_types::{DisplayId, InjectionMode, Platform, SurfaceCapabilities};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Platform identity overrides.
///
/// On a real device these come from the OS; the config lets a simulated
/// device pretend to be a given build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    #[serde(default = "default_sdk_version")]
    pub sdk_version: u32,
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub surface: SurfaceCapabilities,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            sdk_version: default_sdk_version(),
            brand: default_brand(),
            model: default_model(),
            surface: SurfaceCapabilities::default(),
        }
    }
}

impl PlatformConfig {
    pub fn to_platform(&self) -> Platform {
        Platform::new(self.sdk_version, self.brand.clone(), self.model.clone())
            .with_surface(self.surface)
    }
}

/// Control settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Display that input and rotation commands target.
    #[serde(default)]
    pub display_id: DisplayId,
    #[serde(default)]
    pub inject_mode: InjectionMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            display_id: DisplayId::DEFAULT,
            inject_mode: InjectionMode::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_sdk_version() -> u32 {
    34
}

fn default_brand() -> String {
    "generic".to_string()
}

fn default_model() -> String {
    "droidctl".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("sdk_version = 34"));
        assert!(toml_str.contains("inject_mode = \"async\""));
    }

    #[test]
    fn parse_example_config() {
        let toml_str = r#"
[platform]
sdk_version = 34
brand = "HONOR"
model = "Magic5"

[platform.surface]
built_in_display_lookup = true
physical_display_ids = false

[device]
display_id = 2
inject_mode = "wait_for_finish"
log_level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        let platform = config.platform.to_platform();
        assert!(platform.is_brand("honor"));
        assert!(platform.surface.built_in_display_lookup);
        assert_eq!(config.device.display_id, DisplayId(2));
        assert_eq!(config.device.inject_mode, InjectionMode::WaitForFinish);
        assert_eq!(config.device.log_level, "debug");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.platform.sdk_version, 34);
        assert_eq!(config.device.display_id, DisplayId::DEFAULT);
        assert_eq!(config.device.log_level, "info");
    }
}
