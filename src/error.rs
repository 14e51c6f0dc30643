//! Error types for resc-rules
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for resc-rules
#[derive(Error, Debug)]
pub enum RulesClientError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised while talking to the rules API
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Local I/O errors (reading rule files, writing archives)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Errors that occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configured base URL is not a valid absolute URL
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors raised by the HTTP transport
#[derive(Error, Debug)]
pub enum TransportError {
    /// The backend answered with a non-2xx status
    #[error("{url} returned {status}")]
    Status {
        /// Response status
        status: StatusCode,
        /// Requested URL
        url: String,
        /// Response body, lossily decoded
        body: String,
    },

    /// The request timed out
    #[error("Request to {url} timed out")]
    Timeout {
        /// Requested URL
        url: String,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Connection or protocol level failure
    #[error("Request to {url} failed: {source}")]
    Network {
        /// Requested URL
        url: String,
        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Could not join an endpoint path onto the base URL
    #[error("Invalid request URL '{path}': {source}")]
    InvalidUrl {
        /// Endpoint path
        path: String,
        /// The underlying parse error
        source: url::ParseError,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransportError {
    /// HTTP status carried by the error, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend was reached and rejected the request
    pub fn is_status(&self) -> bool {
        matches!(self, TransportError::Status { .. })
    }
}

impl From<toml::de::Error> for RulesClientError {
    fn from(err: toml::de::Error) -> Self {
        RulesClientError::Config(ConfigError::Parse(err))
    }
}
