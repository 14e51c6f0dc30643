//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

use crate::transport::{DEFAULT_BASE_URL, DEFAULT_RETRIES};

/// Rules API location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the rules API (e.g. http://localhost:8000/resc/v1)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportSettings {
    /// Automatic retries per request
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Delay between retries in milliseconds
    #[serde(default)]
    pub retry_delay_ms: u64,

    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            retry_delay_ms: 0,
            user_agent: None,
        }
    }
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
