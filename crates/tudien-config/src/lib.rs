use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::server::ServerConfig;
use self::service::ServiceConfig;
use self::ui::UiConfig;

pub mod audio;
pub mod server;
pub mod service;
pub mod ui;

pub use service::MAX_SUGGESTIONS;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub audio: AudioConfig,
    pub ui: UiConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to open config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    /// Build configuration from environment variables
    pub fn new() -> Self {
        Config {
            service: ServiceConfig::new(),
            server: ServerConfig::new(),
            audio: AudioConfig::new(),
            ui: UiConfig::new(),
        }
    }

    /// Load a JSON profile; sections missing from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let reader = BufReader::new(file);

        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            server: ServerConfig::default(),
            audio: AudioConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"service": {"timeout_seconds": 5}}"#).unwrap();

        assert_eq!(config.service.timeout_seconds, 5);
        assert_eq!(config.service.base_url, "https://minhqnd.com/api/dictionary");
        assert_eq!(config.service.suggestion_limit(), MAX_SUGGESTIONS);
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
        assert!(config.audio.enabled);
    }

    #[test]
    fn test_suggestion_limit_is_capped() {
        let config: Config =
            serde_json::from_str(r#"{"service": {"suggestion_limit": 50}}"#).unwrap();

        assert_eq!(config.service.suggestion_limit(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config: Config =
            serde_json::from_str(r#"{"service": {"timeout_seconds": 0}}"#).unwrap();

        assert_eq!(config.service.timeout(), Duration::from_secs(1));
        assert_eq!(Config::default().service.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
