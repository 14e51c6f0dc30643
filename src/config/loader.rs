//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, RulesClientError};
use crate::transport::{normalize_base_url, TransportConfig};

use super::{ApiConfig, TransportSettings};

/// Project-local configuration file name
pub const CONFIG_FILENAME: &str = ".resc-rules.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API location
    #[serde(default)]
    pub api: ApiConfig,

    /// Transport settings
    #[serde(default)]
    pub transport: TransportSettings,
}

impl Config {
    /// Load configuration from the working directory, the user config
    /// directory, or fall back to defaults
    pub fn load_or_default() -> Result<Self, RulesClientError> {
        match Self::discover(Path::new("."), dirs::config_dir().as_deref()) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// First existing config file: `<dir>/.resc-rules.toml`, then
    /// `<user_config_dir>/resc-rules/config.toml`
    pub fn discover(dir: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
        let local = dir.join(CONFIG_FILENAME);
        if local.is_file() {
            return Some(local);
        }

        let user = user_config_dir?.join("resc-rules").join("config.toml");
        user.is_file().then_some(user)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, RulesClientError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RulesClientError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        toml::from_str(&content).map_err(Into::into)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, RulesClientError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Build the transport configuration, with `base_url_override` taking
    /// precedence over the file
    pub fn transport_config(
        &self,
        base_url_override: Option<&str>,
    ) -> Result<TransportConfig, RulesClientError> {
        let base_url = base_url_override.unwrap_or(&self.api.base_url);
        let mut config = TransportConfig {
            base_url: normalize_base_url(base_url)?,
            retries: self.transport.retries,
            timeout: Duration::from_secs(self.transport.timeout_secs),
            connect_timeout: Duration::from_secs(self.transport.connect_timeout_secs),
            retry_delay: Duration::from_millis(self.transport.retry_delay_ms),
            ..TransportConfig::default()
        };
        if let Some(user_agent) = &self.transport.user_agent {
            config.user_agent = user_agent.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, crate::transport::DEFAULT_BASE_URL);
        assert_eq!(config.transport.retries, 3);
        assert_eq!(config.transport.retry_delay_ms, 0);
    }

    #[test]
    fn test_partial_config_parsing() {
        let toml_content = r#"
[api]
base_url = "https://resc.example.com/resc/v1"

[transport]
retries = 5
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://resc.example.com/resc/v1");
        assert_eq!(config.transport.retries, 5);
        assert_eq!(config.transport.timeout_secs, 30);
    }

    #[test]
    fn test_to_toml_round_trip() {
        let mut config = Config::default();
        config.transport.retry_delay_ms = 250;
        let content = config.to_toml().unwrap();
        assert!(content.contains("[transport]"));
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed.transport.retry_delay_ms, 250);
    }

    #[test]
    fn test_transport_config_override() {
        let config = Config::default();
        let transport = config
            .transport_config(Some("http://override:9000/api"))
            .unwrap();
        assert_eq!(transport.base_url.as_str(), "http://override:9000/api/");
        assert_eq!(transport.retries, 3);
        assert_eq!(transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_transport_config_invalid_url() {
        let mut config = Config::default();
        config.api.base_url = "::not-a-url".to_string();
        let err = config.transport_config(None).unwrap_err();
        assert!(matches!(
            err,
            RulesClientError::Config(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_discover_prefers_local_file() {
        let work = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let user_file = user.path().join("resc-rules").join("config.toml");
        fs::create_dir_all(user_file.parent().unwrap()).unwrap();
        fs::write(&user_file, "").unwrap();

        assert_eq!(
            Config::discover(work.path(), Some(user.path())),
            Some(user_file)
        );

        let local = work.path().join(CONFIG_FILENAME);
        fs::write(&local, "").unwrap();
        assert_eq!(Config::discover(work.path(), Some(user.path())), Some(local));
    }

    #[test]
    fn test_discover_none() {
        let work = TempDir::new().unwrap();
        assert_eq!(Config::discover(work.path(), None), None);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from_file(Path::new("/nonexistent/resc.toml")).unwrap_err();
        assert!(matches!(
            err,
            RulesClientError::Config(ConfigError::FileRead { .. })
        ));
    }
}
