//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::api::DEFAULT_API_URL;

const APP_NAME: &str = "foxgallery";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "foxgallery";

/// Number of images fetched per load.
pub const DEFAULT_BATCH_SIZE: usize = 6;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from `config.toml`, overridden by CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Keep favorites, tags and theme in memory only.
    #[serde(skip)]
    pub ephemeral: bool,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Random image endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Images fetched per load.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Directory holding favorites, tags and theme records.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Download and draw the full image in the preview overlay.
    #[serde(default = "default_true")]
    pub image_preview: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            image_preview: true,
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Accent color (name or hex code).
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: default_accent_color(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_request_timeout() -> u64 {
    30
}

fn default_accent_color() -> String {
    "Orange".to_string()
}

fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api_url = api_url;
        }
        if let Some(batch_size) = args.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(data_dir) = args.data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(image_preview) = args.image_preview {
            self.ui.image_preview = image_preview;
        }
        if let Some(accent_color) = args.accent_color {
            self.theme.accent_color = accent_color;
        }
        if args.ephemeral {
            self.ephemeral = true;
        }
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("foxgallery.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns images per load, never zero.
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }

    /// Returns the HTTP request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            ephemeral: false,
            log_level: LogLevel::Info,
            api_url: default_api_url(),
            batch_size: DEFAULT_BATCH_SIZE,
            request_timeout_secs: default_request_timeout(),
            data_dir: None,
            ui: UiConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_with_partial_fields() {
        let toml_content = r#"
            api_url = "http://localhost:8080/floof/"
            batch_size = 12

            [ui]
            image_preview = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.api_url, "http://localhost:8080/floof/");
        assert_eq!(config.batch_size, 12);
        assert!(!config.ui.image_preview);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.theme.accent_color, "Orange");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.effective_batch_size(), 6);
        assert!(config.ui.image_preview);
        assert!(!config.ephemeral);
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let config = AppConfig {
            batch_size: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.effective_batch_size(), 1);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "foxgallery",
            "--api-url",
            "http://127.0.0.1:9/floof/",
            "--batch-size",
            "3",
            "--image-preview",
            "false",
            "--ephemeral",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.api_url, "http://127.0.0.1:9/floof/");
        assert_eq!(config.batch_size, 3);
        assert!(!config.ui.image_preview);
        assert!(config.ephemeral);
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
