//! Startup configuration: optional `jokebox.ron` plus environment overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use jokebox_core::MAX_UNIQUE_ATTEMPTS;
use jokebox_engine::{FetchSettings, DEFAULT_API_BASE};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::{LogDestination, DEFAULT_LOG_FILE};

pub const CONFIG_FILENAME: &str = "jokebox.ron";
pub const API_BASE_ENV: &str = "JOKEBOX_API_BASE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub max_unique_attempts: usize,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_body_bytes: fetch.max_bytes,
            max_unique_attempts: MAX_UNIQUE_ATTEMPTS,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Reads `jokebox.ron` from `dir`; a missing file yields the defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config: Self = ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.clone(),
            message: err.to_string(),
        })?;
        config.log_level()?;
        Ok(config)
    }

    /// Applies overrides read through `lookup` (normally `std::env::var`).
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup(API_BASE_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        self
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_body_bytes,
            ..FetchSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(temp.path()).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.max_unique_attempts, 10);
        assert_eq!(config.fetch_settings().base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILENAME),
            r#"(api_base: "http://localhost:9000/jokes", max_unique_attempts: 3, log_destination: Off)"#,
        )
        .unwrap();

        let config = AppConfig::load(temp.path()).unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/jokes");
        assert_eq!(config.max_unique_attempts, 3);
        assert_eq!(config.log_destination, LogDestination::Off);
        assert_eq!(config.request_timeout_secs, 30);

        let settings = config.fetch_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.allowed_content_types, vec!["application/json"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), "(api_base: 42").unwrap();

        let err = AppConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn bad_log_level_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"(log_level: "chatty")"#).unwrap();

        let err = AppConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::LogLevel(level) if level == "chatty"));
    }

    #[test]
    fn env_override_replaces_api_base() {
        let config = AppConfig::default().with_env_overrides(|key| {
            (key == API_BASE_ENV).then(|| " http://127.0.0.1:8080/jokes ".to_string())
        });
        assert_eq!(config.api_base, "http://127.0.0.1:8080/jokes");

        let untouched = AppConfig::default().with_env_overrides(|_| Some(String::new()));
        assert_eq!(untouched.api_base, DEFAULT_API_BASE);
    }
}
