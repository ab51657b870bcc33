//! Runtime configuration: defaults, `~/.roster/config.yaml`, then environment

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILE,
    DEFAULT_TIMEOUT_SECS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid API base URL '{0}': expected an absolute http(s) URL")]
    InvalidBaseUrl(String),
}

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub log_dir: PathBuf,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: PathBuf::from("."),
            log_file: String::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Resolve configuration from the user's home directory and environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path();
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve(path.as_deref(), env_url.as_deref())
    }

    /// Layer an optional config file and an optional base URL override over
    /// the defaults
    pub fn resolve(file: Option<&Path>, url_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Config::default(),
        };

        if let Some(url) = url_override.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }

        config.api_base_url = normalize_base_url(&config.api_base_url)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `~/.roster/config.yaml`, if a home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Strip trailing slashes and require an absolute http(s) URL
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
            Ok(trimmed.to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file_or_override() {
        let config = Config::resolve(None, None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.log_file, "roster.log");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(&dir.path().join("absent.yaml")), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_values_are_partial_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: https://roster.example.edu/api/\ntimeout_secs: 5\n").unwrap();

        let config = Config::resolve(Some(&path), None).unwrap();
        assert_eq!(config.api_base_url, "https://roster.example.edu/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.log_file, "roster.log");
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: https://roster.example.edu\n").unwrap();

        let config = Config::resolve(Some(&path), Some("http://127.0.0.1:9000/")).unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();

        assert!(matches!(
            Config::resolve(Some(&path), None),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        assert!(matches!(
            normalize_base_url("ftp://files.example.com"),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(normalize_base_url("localhost:5000").is_err());
    }
}
