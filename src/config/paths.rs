//! Path resolution for pomoguard configuration and data files.
//!
//! All pomoguard data is stored in `~/.pomoguard/` unless `POMOGUARD_HOME`
//! points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `pomoguard.db` - SQLite database with sessions, visits, stats, limits

use std::path::PathBuf;

use crate::error::StoreError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "POMOGUARD_HOME";

/// Paths to pomoguard configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomoguard/`
    pub root: PathBuf,
    /// Config file: `~/.pomoguard/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.pomoguard/pomoguard.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `POMOGUARD_HOME`, falling back to `~/.pomoguard`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StoreError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StoreError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomoguard")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("pomoguard.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StoreError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-pomoguard");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("pomoguard.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("data"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
