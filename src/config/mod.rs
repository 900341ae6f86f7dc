//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::error::ConfigError;
use crate::sysfs::DeviceEnv;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Device selection settings
    pub device: DeviceConfig,
    /// Debug settings
    pub debug: DebugConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Dry run mode
    pub dry_run: bool,
}

/// Device selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Directory holding the `cardN` entries
    pub drm_root: PathBuf,
    /// Target card index
    pub card: u32,
    /// Explicit device directory, overrides `drm_root`/`card`
    pub path: Option<PathBuf>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            drm_root: PathBuf::from("/sys/class/drm"),
            card: 0,
            path: None,
        }
    }
}

impl DeviceConfig {
    /// Directory of the selected device
    pub fn device_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => self.drm_root.join(format!("card{}", self.card)),
        }
    }

    /// Check that the configured paths are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_none() && self.drm_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "device.drm_root".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Log failed attribute file accesses
    pub file_errors: bool,
}

impl DebugConfig {
    /// Environment handed to constructed devices
    pub fn device_env(&self) -> DeviceEnv {
        DeviceEnv {
            debug_file_errors: self.file_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.device.card, 0);
        assert_eq!(
            config.device.device_path(),
            PathBuf::from("/sys/class/drm/card0")
        );
        assert!(!config.debug.device_env().debug_file_errors);
    }

    #[test]
    fn test_explicit_path_wins() {
        let device = DeviceConfig {
            path: Some(PathBuf::from("/tmp/fake-card")),
            card: 3,
            ..Default::default()
        };
        assert_eq!(device.device_path(), PathBuf::from("/tmp/fake-card"));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [device]
            card = 1

            [debug]
            file_errors = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.device.device_path(),
            PathBuf::from("/sys/class/drm/card1")
        );
        assert!(config.debug.file_errors);
        assert!(!config.general.dry_run);
    }

    #[test]
    fn test_validate_empty_root() {
        let device = DeviceConfig {
            drm_root: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(
            device.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
