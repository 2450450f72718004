//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\course-minder\config.toml
//! - macOS: ~/Library/Application Support/course-minder/config.toml
//! - Linux: ~/.config/course-minder/config.toml
//!
//! The config file is human-readable and editable. A missing or broken file
//! is never fatal; defaults apply.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::ingest::{ImportConfig, mock, scrape, youtube};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Playlist import settings
    pub import: ImportSettings,

    /// Database location
    pub storage: StorageConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// YouTube Data API key; without one, imports use the page scrape only
    pub youtube_api_key: Option<String>,
}

/// Playlist import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Per-request HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Reference that imports the generated demo playlist
    pub demo_sentinel: String,

    pub mock_video_count: u32,
    pub mock_seed: u64,

    pub api_base_url: String,
    pub scrape_base_url: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            demo_sentinel: mock::DEFAULT_SENTINEL.to_string(),
            mock_video_count: mock::DEFAULT_VIDEO_COUNT,
            mock_seed: 42,
            api_base_url: youtube::DEFAULT_BASE_URL.to_string(),
            scrape_base_url: scrape::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file (empty = `course_minder.db` in the working directory)
    pub database_path: Option<PathBuf>,
}

impl Config {
    /// Resolve the acquisition settings. A non-blank `api_key_override`
    /// (from the command line or environment) wins over the file's key.
    pub fn to_import_config(&self, api_key_override: Option<&str>) -> ImportConfig {
        let youtube_api_key = api_key_override
            .or(self.credentials.youtube_api_key.as_deref())
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);

        ImportConfig {
            youtube_api_key,
            request_timeout: Duration::from_secs(self.import.request_timeout_secs.max(1)),
            demo_sentinel: self.import.demo_sentinel.clone(),
            mock_video_count: self.import.mock_video_count,
            mock_seed: self.import.mock_seed,
            api_base_url: self.import.api_base_url.clone(),
            scrape_base_url: self.import.scrape_base_url.clone(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("course-minder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir)
}

fn save_to(config: &Config, dir: &std::path::Path) -> Result<PathBuf, ConfigError> {
    let path = dir.join("config.toml");

    std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, &path)
        .map_err(|e| ConfigError::Rename(temp_path, path.clone(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(path)
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[credentials]"));
        assert!(toml.contains("[import]"));
        assert!(toml.contains("[storage]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[credentials]
youtube_api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.credentials.youtube_api_key, Some("my-key".to_string()));
        assert_eq!(config.import.request_timeout_secs, 15);
        assert_eq!(config.import.demo_sentinel, "demo-java");
        assert_eq!(config.import.mock_video_count, 100);
        assert!(config.storage.database_path.is_none());
    }

    #[test]
    fn test_import_config_from_file() {
        let toml = r#"
[credentials]
youtube_api_key = "file-key"

[import]
request_timeout_secs = 3
demo_sentinel = "demo"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let import = config.to_import_config(None);

        assert_eq!(import.youtube_api_key.as_deref(), Some("file-key"));
        assert_eq!(import.request_timeout, Duration::from_secs(3));
        assert_eq!(import.demo_sentinel, "demo");
    }

    #[test]
    fn test_api_key_override_wins() {
        let mut config = Config::default();
        config.credentials.youtube_api_key = Some("file-key".to_string());

        let import = config.to_import_config(Some("cli-key"));
        assert_eq!(import.youtube_api_key.as_deref(), Some("cli-key"));
    }

    #[test]
    fn test_blank_api_key_means_none() {
        let mut config = Config::default();
        config.credentials.youtube_api_key = Some("  ".to_string());
        assert!(config.to_import_config(None).youtube_api_key.is_none());
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let mut config = Config::default();
        config.import.request_timeout_secs = 0;
        assert_eq!(config.to_import_config(None).request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_save_writes_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/data/courses.db"));

        let path = save_to(&config, &dir.path().join("nested")).unwrap();
        let parsed: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(parsed.storage.database_path, Some(PathBuf::from("/data/courses.db")));
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
