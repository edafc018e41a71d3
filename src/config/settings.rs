//! Configuration settings for ytdata.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the YouTube Data API key.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub transcript: TranscriptSettings,
    pub server: ServerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// YouTube Data API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// YouTube Data API key. `YOUTUBE_API_KEY` takes precedence.
    pub api_key: Option<String>,
    /// Base URL of the Data API.
    pub api_base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Region used when a tool call does not name one.
    pub default_region: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout_secs: 30,
            default_region: "US".to_string(),
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Watch page URL used to discover caption tracks.
    pub watch_url: String,
    /// Preferred transcript language.
    pub default_language: String,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            watch_url: "https://www.youtube.com/watch".to_string(),
            default_language: "en".to_string(),
        }
    }
}

/// HTTP bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    ///
    /// A `.env` file in the working directory is read first, then
    /// `YOUTUBE_API_KEY` overrides whatever key the file carries.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let config_path = match path {
            Some(p) => Self::expand_path(&p.to_string_lossy()),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            debug!("Reading config from {}", config_path.display());
            Self::from_file(&config_path)?
        } else {
            Settings::default()
        };

        settings.apply_env(std::env::var(API_KEY_ENV).ok());
        Ok(settings)
    }

    /// Parse a configuration file without consulting the environment.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply an API key taken from the environment. Empty values are ignored.
    pub fn apply_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.youtube.api_key = Some(key.trim().to_string());
        }
    }

    /// The configured API key, if any non-empty key is set.
    pub fn api_key(&self) -> Option<&str> {
        self.youtube
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YtDataError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ytdata")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(
            settings.youtube.api_base_url,
            "https://www.googleapis.com/youtube/v3"
        );
        assert_eq!(settings.youtube.timeout_secs, 30);
        assert_eq!(settings.transcript.default_language, "en");
        assert!(settings.api_key().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[youtube]\napi_key = \"from-file\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.api_key(), Some("from-file"));
        assert_eq!(settings.youtube.timeout_secs, 5);
        assert_eq!(settings.youtube.default_region, "US");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_env_key_overrides_file() {
        let mut settings = Settings::default();
        settings.youtube.api_key = Some("from-file".to_string());

        settings.apply_env(Some("  from-env ".to_string()));
        assert_eq!(settings.api_key(), Some("from-env"));

        settings.apply_env(Some("   ".to_string()));
        assert_eq!(settings.api_key(), Some("from-env"));

        settings.apply_env(None);
        assert_eq!(settings.api_key(), Some("from-env"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.port = 8080;
        settings.save_to(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.server.port, 8080);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[youtube\n").unwrap();
        assert!(matches!(
            Settings::from_file(&path),
            Err(crate::error::YtDataError::TomlParse(_))
        ));
    }
}
