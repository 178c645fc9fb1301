//! Configuration file support for chromanote.
//!
//! Settings are read from `~/.config/chromanote/config.toml` (or the path given
//! with `--config`). If no config file exists, defaults are used.

pub mod types;

pub use types::{DisplayConfig, PickerConfig, StorageConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
///
/// # Example TOML
/// ```toml
/// [storage]
/// notes_file = "notes_data.json"
/// backup_retention = 1
///
/// [picker]
/// command = ["zenity", "--color-selection"]
/// handoff_file = "/tmp/selected_color.txt"
///
/// [display]
/// list_swatches = 5
/// ansi_colors = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Note store location and durability
    #[serde(default)]
    pub storage: StorageConfig,

    /// External color picker
    #[serde(default)]
    pub picker: PickerConfig,

    /// Terminal output
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Clamps out-of-range values, logging a warning for each.
    ///
    /// - `storage.backup_retention`: 0 - 1
    /// - `display.list_swatches`: 1 - 20
    fn validate_and_clamp(&mut self) {
        if self.storage.backup_retention > 1 {
            log::warn!(
                "Invalid backup_retention {}, clamping to 0-1 range",
                self.storage.backup_retention
            );
            self.storage.backup_retention = 1;
        }

        if self.storage.notes_file.trim().is_empty() {
            log::warn!(
                "Empty storage.notes_file, falling back to '{}'",
                crate::store::DEFAULT_NOTES_FILE
            );
            self.storage.notes_file = crate::store::DEFAULT_NOTES_FILE.to_string();
        }

        if !(1..=20).contains(&self.display.list_swatches) {
            log::warn!(
                "Invalid list_swatches {}, clamping to 1-20 range",
                self.display.list_swatches
            );
            self.display.list_swatches = self.display.list_swatches.clamp(1, 20);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("chromanote");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))
    }

    /// Parses and validates TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
