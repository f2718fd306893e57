//! Configuration settings for habitual.
//!
//! Settings are loaded from `~/.habitual/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::HabitError;
use crate::habits::{Frequency, DEFAULT_CATEGORY, DEFAULT_COLOR, DEFAULT_ICON};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// The signed-in identity.
    pub identity: IdentityConfig,
    /// Defaults applied to new habits.
    pub habits: HabitDefaults,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color_setting")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the global `colored` override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// The identity habitual acts as.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IdentityConfig {
    /// User id, `None` when signed out.
    pub user: Option<String>,
    /// Whether the user's email has been verified.
    pub email_verified: bool,
}

/// Defaults for the habit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitDefaults {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_habit_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    /// Include archived habits in listings.
    #[serde(default)]
    pub show_archived: bool,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color_setting() -> ColorSetting {
    ColorSetting::Auto
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_habit_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color_setting(),
        }
    }
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            category: default_category(),
            frequency: Frequency::default(),
            color: default_habit_color(),
            icon: default_icon(),
            show_archived: false,
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
    pub fn load() -> Result<Self, HabitError> {
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
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, HabitError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HabitError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            HabitError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), HabitError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), HabitError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| HabitError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            HabitError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.identity.user, None);
        assert_eq!(config.habits.category, "Health");
        assert_eq!(config.habits.color, "#E50046");
        assert_eq!(config.habits.frequency, Frequency::Daily);
        assert!(!config.habits.show_archived);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.identity.user = Some("user-1".to_string());
        config.identity.email_verified = true;
        config.habits.category = "Fitness".to_string();

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.identity.user.as_deref(), Some("user-1"));
        assert!(loaded.identity.email_verified);
        assert_eq!(loaded.habits.category, "Fitness");
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
habits:
  frequency: weekly
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.habits.frequency, Frequency::Weekly);
        assert_eq!(config.habits.icon, DEFAULT_ICON);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "habits: [not, a, map]").unwrap();

        let result = Config::load_from_path(&config_path);
        assert!(matches!(result, Err(HabitError::Config(_))));
    }
}
