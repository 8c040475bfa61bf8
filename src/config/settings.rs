//! Configuration settings for pomoguard.
//!
//! Settings are loaded from `~/.pomoguard/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Paths;
use crate::error::StoreError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Database location.
    pub storage: StorageConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the database file. Defaults to `~/.pomoguard/pomoguard.db`.
    pub database: Option<PathBuf>,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Days covered by the weekly stats window, counted back from today.
    #[serde(default = "default_weekly_window")]
    pub weekly_window_days: u32,
}

const fn default_weekly_window() -> u32 {
    7
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            weekly_window_days: default_weekly_window(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, StoreError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            StoreError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), StoreError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StoreError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            StoreError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Resolve the database file, honoring `storage.database`.
    ///
    /// # Errors
    ///
    /// Returns an error if the default data directory cannot be resolved
    /// or created.
    pub fn database_path(&self) -> Result<PathBuf, StoreError> {
        if let Some(ref path) = self.storage.database {
            return Ok(path.clone());
        }

        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(paths.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database.is_none());
        assert_eq!(config.stats.weekly_window_days, 7);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.stats.weekly_window_days, 7);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.storage.database = Some(temp_dir.path().join("custom.db"));
        config.stats.weekly_window_days = 14;

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.storage.database, config.storage.database);
        assert_eq!(loaded.stats.weekly_window_days, 14);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
stats:
  weekly_window_days: 30
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.stats.weekly_window_days, 30);
        assert!(config.storage.database.is_none());
    }

    #[test]
    fn test_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "stats: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn test_database_path_override() {
        let mut config = Config::default();
        config.storage.database = Some(PathBuf::from("/var/lib/pomoguard/activity.db"));

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/var/lib/pomoguard/activity.db")
        );
    }
}
