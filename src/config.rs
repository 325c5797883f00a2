/// Client configuration
///
/// Read from `<config_dir>/ad-manager/config.json` when present:
/// - Linux: ~/.config/ad-manager/config.json
/// - macOS: ~/Library/Application Support/ad-manager/config.json
/// - Windows: %APPDATA%\ad-manager\config.json
///
/// `AD_MANAGER_SERVER` overrides the server URL from the file.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `server_url`
pub const SERVER_ENV: &str = "AD_MANAGER_SERVER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the ad server (the Flask app listens on 5002)
    pub server_url: String,
    /// How long a toast stays on screen
    pub toast_seconds: u64,
    /// Edge length of card thumbnails in pixels
    pub thumbnail_size: u32,
    /// Window drops arrive one file per event; wait this long before starting the batch
    pub drop_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5002".to_string(),
            toast_seconds: 5,
            thumbnail_size: 256,
            drop_settle_ms: 50,
        }
    }
}

impl Config {
    /// Load the config file (if any), apply the environment override and validate.
    ///
    /// A missing file is not an error. A broken file is logged and defaults are used,
    /// but an invalid server URL is always reported.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("⚠️  {e}, falling back to defaults");
                Self::default()
            }),
            _ => Self::default(),
        };

        if let Ok(server) = std::env::var(SERVER_ENV) {
            config.server_url = server;
        }

        config.server_base()?;
        Ok(config)
    }

    /// Where the config file lives on this platform
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("ad-manager");
        path.push("config.json");
        Some(path)
    }

    /// Parse a config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// The server URL as a parsed base, with a trailing slash so relative joins work
    pub fn server_base(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::ServerUrl {
            url: self.server_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.server_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }

    pub fn drop_settle(&self) -> Duration {
        Duration::from_millis(self.drop_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.toast_duration(), Duration::from_secs(5));
        assert_eq!(config.thumbnail_size, 256);
        assert_eq!(
            config.server_base().unwrap().as_str(),
            "http://localhost:5002/"
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "server_url": "http://jetson.local:8080/ads" }}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server_url, "http://jetson.local:8080/ads");
        assert_eq!(config.toast_seconds, 5);
        assert_eq!(
            config.server_base().unwrap().as_str(),
            "http://jetson.local:8080/ads/"
        );
    }

    #[test]
    fn test_broken_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_rejects_non_http_server() {
        let config = Config {
            server_url: "ftp://example.com".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.server_base(),
            Err(ConfigError::ServerUrl { .. })
        ));

        let config = Config {
            server_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.server_base().is_err());
    }
}
