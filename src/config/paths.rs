//! Path resolution for habitlog configuration and data files.
//!
//! All habitlog data is stored in `~/.habitlog/`:
//! - `config.yaml` - Main configuration file
//! - `habits.db` - SQLite database holding the registry and log tables

use std::path::PathBuf;

use crate::error::HabitError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "HABITLOG_HOME";

/// Paths to habitlog configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.habitlog/`
    pub root: PathBuf,
    /// Config file: `~/.habitlog/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habitlog/habits.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on `HABITLOG_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither directory can be determined.
    pub fn new() -> Result<Self, HabitError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            HabitError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".habitlog")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habits.db"),
            root,
        }
    }

    /// Ensure the data directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), HabitError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                HabitError::Config(format!(
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
        let root = PathBuf::from("/tmp/test-habitlog");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("habits.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("habitlog"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
