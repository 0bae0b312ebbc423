//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::APP_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PAGEWRIGHT_CONFIG_DIR";

/// Log levels accepted by `ui.log_level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory holding the stored workspace (defaults to `<config_dir>/data`)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Editing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Record a whole slider gesture as one undo step
    #[serde(default = "default_coalesce")]
    pub coalesce_adjustments: bool,
}

const fn default_coalesce() -> bool {
    true
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            coalesce_adjustments: default_coalesce(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Pagewright/config.toml`
/// - macOS: `~/Library/Application Support/Pagewright/config.toml`
/// - Windows: `%APPDATA%\Pagewright\config.toml`
///
/// `PAGEWRIGHT_CONFIG_DIR` replaces the directory on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Editing behaviour
    #[serde(default)]
    pub editor: EditorConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolves where the workspace is stored.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit file using temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `ui.log_level` is one of [`LOG_LEVELS`]
    /// - `paths.data_dir`, if set, is not an existing regular file
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.ui.log_level.as_str()) {
            anyhow::bail!(
                "Invalid ui.log_level '{}'. Expected one of: {}",
                self.ui.log_level,
                LOG_LEVELS.join(", ")
            );
        }

        if let Some(dir) = &self.paths.data_dir {
            if dir.is_file() {
                anyhow::bail!("paths.data_dir is a file, not a directory: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Sets a value by dotted key (`paths.data_dir`, `editor.coalesce_adjustments`,
    /// `ui.log_level`), validating the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "paths.data_dir" => {
                next.paths.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "editor.coalesce_adjustments" => {
                next.editor.coalesce_adjustments = value
                    .parse()
                    .context(format!("Expected true or false, got '{value}'"))?;
            }
            "ui.log_level" => next.ui.log_level = value.to_lowercase(),
            other => anyhow::bail!(
                "Unknown config key '{other}'. Known keys: paths.data_dir, \
                 editor.coalesce_adjustments, ui.log_level"
            ),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.data_dir, None);
        assert!(config.editor.coalesce_adjustments);
        assert_eq!(config.ui.log_level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.set("editor.coalesce_adjustments", "false").unwrap();
        config.set("paths.data_dir", "/tmp/pagewright-data").unwrap();
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[ui]\nlog_level = \"debug\"\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.ui.log_level, "debug");
        assert!(loaded.editor.coalesce_adjustments);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::new();
        assert!(config.set("ui.log_level", "loud").is_err());
        assert!(config.set("editor.coalesce_adjustments", "maybe").is_err());
        assert!(config.set("paths.cache_dir", "x").is_err());
        assert_eq!(config, Config::new());

        config.set("ui.log_level", "INFO").unwrap();
        assert_eq!(config.ui.log_level, "info");
    }

    #[test]
    fn test_data_dir_must_not_be_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("occupied");
        fs::write(&file, "").unwrap();

        let mut config = Config::new();
        config.paths.data_dir = Some(file);
        assert!(config.validate().is_err());
    }
}
