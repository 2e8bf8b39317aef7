use super::app_config::AppConfig;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Locates and reads `config.toml`.
pub struct ConfigManager {
    default_path: PathBuf,
}

impl ConfigManager {
    /// Uses `config.toml` in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        AppConfig::default_config_path()
            .map(Self::with_path)
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses `path` as the default config file.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { default_path: path }
    }

    /// Loads the configuration from `path_override` or the default file.
    ///
    /// A missing file is created with defaults; a malformed one is left
    /// untouched and defaults are used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the default cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        let path = path_override.unwrap_or(self.default_path.as_path());

        if !path.exists() {
            info!(?path, "Config file not found, writing defaults");
            let config = AppConfig::default();
            write_atomic(path, &toml::to_string_pretty(&config)?)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content).unwrap_or_else(|e| {
            warn!(?path, error = %e, "Malformed config file, using defaults");
            AppConfig::default()
        }))
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let parent = path
        .parent()
        .ok_or_else(|| std::io::Error::other("config path has no parent"))?;
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_written_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foxgallery").join("config.toml");
        let manager = ConfigManager::with_path(path.clone());

        let config = manager.load_config(None).unwrap();
        assert_eq!(config.batch_size, 6);
        assert!(path.exists());

        let reloaded = manager.load_config(None).unwrap();
        assert_eq!(reloaded.api_url, config.api_url);
    }

    #[test]
    fn test_malformed_config_falls_back_and_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "batch_size = [").unwrap();

        let config = ConfigManager::with_path(path.clone())
            .load_config(None)
            .unwrap();

        assert_eq!(config.batch_size, 6);
        assert_eq!(fs::read_to_string(&path).unwrap(), "batch_size = [");
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempdir().unwrap();
        let unused = dir.path().join("unused").join("config.toml");
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "batch_size = 2\n").unwrap();

        let config = ConfigManager::with_path(unused.clone())
            .load_config(Some(&custom))
            .unwrap();

        assert_eq!(config.batch_size, 2);
        assert!(!unused.exists());
    }
}
