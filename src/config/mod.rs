//! Configuration management for LazyAmbar.
//!
//! This module handles loading, saving, and managing user configuration
//! including profiles and application settings. The file lives at
//! `<config dir>/lazyambar/config.toml`.

mod profile;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use profile::Profile;
pub use settings::{AppMode, Settings};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config directory could not be created.
    #[error("failed to create config directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file could not be written.
    #[error("failed to write config file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The config file is not valid TOML for our schema.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A semantic check failed.
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// The requested profile does not exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete on-disk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
    /// Configured backends.
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    /// The default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("lazyambar").join("config.toml"))
    }

    /// Load from the default path. A missing file yields the default config.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from an explicit path. A missing file yields the default config.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), profiles = config.profiles.len(), "Loaded configuration");
        Ok(config)
    }

    /// Write to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Validate every profile and the uniqueness of profile names.
    pub fn validate(&self) -> Result<()> {
        for (i, profile) in self.profiles.iter().enumerate() {
            profile.validate()?;
            if self.profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile '{}'",
                    profile.name
                )));
            }
        }

        if self.settings.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Find a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// The default profile, or the first one if no default is set.
    pub fn get_default_profile(&self) -> Option<&Profile> {
        match &self.settings.default_profile {
            Some(name) => self.profiles.iter().find(|p| &p.name == name),
            None => self.profiles.first(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> Config {
        Config {
            settings: Settings {
                default_profile: Some("home".to_string()),
                ..Settings::default()
            },
            profiles: vec![
                Profile::new(
                    "work".to_string(),
                    "https://ambar.company.com".to_string(),
                    "me@company.com".to_string(),
                ),
                Profile::new(
                    "home".to_string(),
                    "http://localhost:8080".to_string(),
                    "me@home.net".to_string(),
                ),
            ],
        }
    }

    #[test]
    fn test_missing_file_yields_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = sample_config();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_parse_minimal_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[[profiles]]
name = "local"
url = "http://localhost"
email = "a@b.c"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.settings.page_size, 20);
        assert_eq!(config.get_default_profile().unwrap().name, "local");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "profiles = 3").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let mut config = sample_config();
        config.profiles.push(config.profiles[0].clone());

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate profile 'work'"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = sample_config();
        config.settings.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_profile_lookup() {
        let config = sample_config();
        assert_eq!(config.get_default_profile().unwrap().name, "home");
        assert_eq!(config.profile("work").unwrap().email, "me@company.com");
        assert!(matches!(
            config.profile("missing"),
            Err(ConfigError::ProfileNotFound(_))
        ));
    }
}
