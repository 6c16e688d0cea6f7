use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable that overrides `provider.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub trailers: TrailerConfig,
    pub banner: BannerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// The configured key, `None` when blank.
    pub fn api_key(&self) -> Option<&str> {
        Some(self.api_key.trim()).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerConfig {
    pub enabled: bool,
    pub tmdb_base_url: String,
    #[serde(default)]
    pub tmdb_api_key: String,
    /// External video search page opened when no trailer was resolved.
    pub search_url: String,
}

impl TrailerConfig {
    /// The TMDB key when trailer lookup is enabled and a key is set.
    pub fn tmdb_api_key(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        Some(self.tmdb_api_key.trim()).filter(|k| !k.is_empty())
    }
}

/// Category keys the featured banner draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Write logs to a daily-rotated file here instead of stderr.
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load config: the user file if it exists, else built-in defaults.
    /// `OMDB_API_KEY` overrides the provider key in both cases.
    pub fn load() -> Result<Self, CoreError> {
        let user_path = Self::config_path();
        let config = if user_path.exists() {
            Self::load_from(&user_path)?
        } else {
            toml::from_str(DEFAULT_CONFIG).map_err(|e| CoreError::Config(e.to_string()))?
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Parse a config file at an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace the provider key when `key` is non-blank.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = key;
        }
        self
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "marquee")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}
