//! Path resolution for habitual configuration and data files.
//!
//! All habitual data is stored in `~/.habitual/` unless `HABITUAL_HOME`
//! points somewhere else:
//! - `config.yaml` - Configuration and the signed-in identity
//! - `habitual.db` - SQLite database holding habits and completions

use std::path::PathBuf;

use crate::error::HabitError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "HABITUAL_HOME";

/// Paths to habitual configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.habitual/`
    pub root: PathBuf,
    /// Config file: `~/.habitual/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habitual/habitual.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `HABITUAL_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither location can be determined.
    pub fn new() -> Result<Self, HabitError> {
        if let Ok(root) = std::env::var(HOME_ENV) {
            if !root.is_empty() {
                return Ok(Self::with_root(PathBuf::from(root)));
            }
        }

        let home = std::env::var("HOME").map_err(|_| {
            HabitError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".habitual")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habitual.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
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
        let root = PathBuf::from("/tmp/test-habitual");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("habitual.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("root"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
    }
}
