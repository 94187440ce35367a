//! User settings management
//!
//! This module handles persistent user configuration stored in config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_timeout_secs() -> u64 {
    30
}

/// User settings stored in config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether prerelease tags (e.g. "1.0.0-beta.1") count as installable releases
    ///
    /// Off by default: most users only want stable versions.
    #[serde(default)]
    pub install_prereleases: bool,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_prereleases: false,
            http_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from config.toml
    ///
    /// Returns default settings if the file doesn't exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Load settings from the default config path
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Save settings to config.toml
    #[allow(dead_code)]
    pub fn save(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))
    }

    /// Default config.toml location (~/.config/bbget/config.toml or platform equivalent)
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("bbget").join("config.toml"))
    }

    /// HTTP timeout as a Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(!settings.install_prereleases);
        assert_eq!(settings.http_timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let settings = Settings {
            install_prereleases: true,
            http_timeout_secs: 10,
        };

        settings.save(&config_path).unwrap();
        let loaded = Settings::load(&config_path).unwrap();

        assert!(loaded.install_prereleases);
        assert_eq!(loaded.http_timeout_secs, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let settings = Settings::load(&config_path).unwrap();
        assert!(!settings.install_prereleases);
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        fs::write(&config_path, "install_prereleases = true\n").unwrap();

        let settings = Settings::load(&config_path).unwrap();
        assert!(settings.install_prereleases);
        assert_eq!(settings.http_timeout_secs, 30);
    }
}
