//! Settings manager for TOML file operations
//!
//! This module provides the `SettingsManager` which loads and saves the
//! import settings file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

use super::settings::ImportSettings;

/// File name of the settings file
const CONFIG_FILE: &str = "config.toml";

/// Settings manager for `gedimport`
///
/// Settings are stored in `~/.config/gedimport/config.toml` by default.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    /// Base directory for configuration files
    config_dir: PathBuf,
}

impl SettingsManager {
    /// Creates a new `SettingsManager` with the default configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join("gedimport");
        Ok(Self { config_dir })
    }

    /// Creates a new `SettingsManager` with a custom configuration directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the settings file path
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Loads settings, falling back to defaults when the file is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// fails validation.
    pub fn load_settings(&self) -> ConfigResult<ImportSettings> {
        let path = self.settings_path();
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(ImportSettings::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;
        let settings: ImportSettings = toml::from_str(&content).map_err(|e| {
            ConfigError::Deserialize(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Saves settings, creating the configuration directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the file cannot be written.
    pub fn save_settings(&self, settings: &ImportSettings) -> ConfigResult<()> {
        settings.validate()?;
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }

        let path = self.settings_path();
        let content = toml::to_string_pretty(settings)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;
        fs::write(&path, content)
            .map_err(|e| ConfigError::Write(format!("Failed to write {}: {}", path.display(), e)))
    }
}
