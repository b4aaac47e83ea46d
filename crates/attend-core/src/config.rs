//! Configuration for the attend client.
//!
//! Loads `${ATTEND_HOME}/config.toml` with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default backend address (local dev server, API prefix included).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base address, including the API prefix.
    pub base_url: Option<String>,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the backend base address.
    ///
    /// Precedence: `ATTEND_BASE_URL` env var, then the config value, then
    /// [`DEFAULT_BASE_URL`]. The result is validated as a URL and stripped
    /// of any trailing slash.
    pub fn resolved_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("ATTEND_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                return normalize_base_url(trimmed);
            }
        }

        if let Some(configured) = self.base_url.as_deref() {
            let trimmed = configured.trim();
            if !trimmed.is_empty() {
                return normalize_base_url(trimmed);
            }
        }

        Ok(DEFAULT_BASE_URL.to_string())
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    url::Url::parse(raw).with_context(|| format!("Invalid base URL: {raw}"))?;
    Ok(raw.trim_end_matches('/').to_string())
}

pub mod paths {
    //! Path resolution for attend configuration and session storage.
    //!
    //! ATTEND_HOME resolution order:
    //! 1. ATTEND_HOME environment variable (if set)
    //! 2. ~/.config/attend (default)

    use std::path::PathBuf;

    /// Returns the attend home directory.
    pub fn attend_home() -> PathBuf {
        if let Ok(home) = std::env::var("ATTEND_HOME") {
            return PathBuf::from(home);
        }

        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("attend")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        attend_home().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.base_url.is_none());
        assert_eq!(config.resolved_base_url().unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn config_value_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://hr.example.com/api/\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        // trailing slash is stripped so path concatenation stays predictable
        assert_eq!(
            config.resolved_base_url().unwrap(),
            "https://hr.example.com/api"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            base_url: Some("not a url".to_string()),
        };
        assert!(config.resolved_base_url().is_err());
    }

    #[test]
    fn garbage_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [broken").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
