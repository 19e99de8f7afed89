//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default origin of the inventory service deployment
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// SIT configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the inventory service
    pub api_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/sit/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Environment variables
        if let Ok(url) = std::env::var("SIT_API_URL") {
            config.api_url = Some(url);
        }
        if let Ok(secs) = std::env::var("SIT_TIMEOUT_SECONDS") {
            if let Ok(secs) = secs.parse() {
                config.timeout_seconds = Some(secs);
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sit")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.api_url.is_some() {
            self.api_url = other.api_url;
        }
        if other.timeout_seconds.is_some() {
            self.timeout_seconds = other.timeout_seconds;
        }
    }

    /// Get the service base URL, without a trailing slash
    pub fn api_url(&self) -> String {
        let url = self
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        url.trim_end_matches('/').to_string()
    }

    /// Get the request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let config = Config {
            api_url: Some("http://inventory.local:3000/".to_string()),
            timeout_seconds: None,
        };
        assert_eq!(config.api_url(), "http://inventory.local:3000");
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut config = Config {
            api_url: Some("http://a:3000".to_string()),
            timeout_seconds: Some(5),
        };
        config.merge(Config {
            api_url: Some("http://b:3000".to_string()),
            timeout_seconds: None,
        });
        assert_eq!(config.api_url(), "http://b:3000");
        assert_eq!(config.timeout_seconds, Some(5));
    }
}
