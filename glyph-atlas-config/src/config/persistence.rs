//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `load_from` (YAML file reading, defaults when missing)
//! - `save_to` (YAML file writing with atomic rename)
//! - XDG-style path helpers (`config_path`, `config_dir`)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::Config;
use crate::error::ConfigError;

impl Config {
    /// Load configuration from the default path, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    ///
    /// Missing fields take their default values. The loaded config is
    /// validated before it is returned.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading existing config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(ConfigError::from)?;
        let config: Config = serde_yaml_ng::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(ConfigError::from)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::from)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::from)?;
        fs::rename(&temp_path, path).map_err(ConfigError::from)?;

        log::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("glyph-atlas")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/glyph-atlas/config.yaml
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("glyph-atlas")
            } else {
                PathBuf::from(".")
            }
        }
    }
}
