//! HTTP transport for the rules API
//!
//! [`Transport`] owns one pooled `reqwest::Client` and an explicit
//! [`TransportConfig`]. Every request goes through [`Transport::execute`],
//! which applies the same retry policy to all calls:
//!
//! - connection failures are retried for every method
//! - 5xx responses are retried for idempotent methods only
//! - timeouts and 4xx responses are never retried
//!
//! Non-2xx responses are returned as [`TransportError::Status`].

use std::borrow::Cow;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ConfigError, TransportError};
use crate::query::QueryParams;

/// Default number of automatic retries per request
pub const DEFAULT_RETRIES: u32 = 3;

/// Default base URL of the rules API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/resc/v1/";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection and resilience settings for [`Transport`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL every endpoint path is joined onto (always ends with `/`)
    pub base_url: Url,
    /// Extra attempts after the first one
    pub retries: u32,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// Pause between attempts
    pub retry_delay: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl TransportConfig {
    /// Create a configuration for `base_url` with default resilience settings
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Override the retry count
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the delay between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry_delay: Duration::ZERO,
            user_agent: format!("resc-rules/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Parse `raw` as an absolute http(s) URL ending with `/`
pub fn normalize_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Per-call overrides of the transport defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Retry count for this call; `None` uses [`TransportConfig::retries`]
    pub retries: Option<u32>,
}

/// How the caller wants the response body decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseEncoding {
    /// JSON documents
    Json,
    /// Raw bytes, kept unmodified
    Binary,
}

impl ResponseEncoding {
    /// `Accept` header sent for this encoding
    pub fn accept(self) -> HeaderValue {
        match self {
            ResponseEncoding::Json => HeaderValue::from_static("application/json"),
            ResponseEncoding::Binary => HeaderValue::from_static("application/octet-stream"),
        }
    }
}

/// A successful (2xx) response with its body fully read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
}

impl ApiResponse {
    /// Assemble a response from already-read parts
    pub fn from_parts(
        status: StatusCode,
        headers: HeaderMap,
        url: Url,
        body: impl Into<Bytes>,
    ) -> Self {
        Self {
            status,
            headers,
            url,
            body: body.into(),
        }
    }

    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the request
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Raw body bytes, unmodified
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Take ownership of the raw body
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decode the body as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// File name announced by `Content-Disposition`, if any
    pub fn attachment_file_name(&self) -> Option<String> {
        let value = self
            .headers
            .get(reqwest::header::CONTENT_DISPOSITION)?
            .to_str()
            .ok()?;
        value.split(';').map(str::trim).find_map(|part| {
            part.strip_prefix("filename=")
                .map(|name| name.trim_matches('"').to_string())
                .filter(|name| !name.is_empty())
        })
    }
}

/// Shared HTTP transport
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    config: TransportConfig,
}

impl Transport {
    /// Build the underlying client from `config`
    pub fn new(config: TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Join `path` onto the base URL and attach `params`
    pub fn url_for(&self, path: &str, params: &QueryParams) -> Result<Url, TransportError> {
        let mut url = self
            .config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| TransportError::InvalidUrl {
                path: path.to_string(),
                source,
            })?;
        params.apply_to(&mut url);
        Ok(url)
    }

    /// Send a request, retrying according to the transport policy
    ///
    /// `build` is called once per attempt so request bodies that cannot be
    /// cloned (multipart forms) are rebuilt for every retry.
    pub async fn execute<F>(
        &self,
        method: Method,
        url: Url,
        encoding: ResponseEncoding,
        options: RequestOptions,
        build: F,
    ) -> Result<ApiResponse, TransportError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let retries = options.retries.unwrap_or(self.config.retries);
        let mut attempt: u32 = 0;

        loop {
            let request = build(
                self.client
                    .request(method.clone(), url.clone())
                    .header(ACCEPT, encoding.accept()),
            );

            let started = Instant::now();
            let result = self.send_once(request, &url).await;
            tracing::debug!(
                method = %method,
                url = %url,
                attempt = attempt + 1,
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "rules API request finished"
            );

            let error = match result {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            if attempt < retries && should_retry(&method, &error) {
                attempt += 1;
                tracing::debug!(method = %method, url = %url, attempt, error = %error, "retrying request");
                if !self.config.retry_delay.is_zero() {
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                continue;
            }

            tracing::warn!(method = %method, url = %url, attempts = attempt + 1, error = %error, "rules API request failed");
            return Err(error);
        }
    }

    async fn send_once(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<ApiResponse, TransportError> {
        let response = request.send().await.map_err(|e| classify(url, e))?;
        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().clone();

        if !status.is_success() {
            let body = response
                .bytes()
                .await
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TransportError::Status {
                status,
                url: url.to_string(),
                body,
            });
        }

        let body = response.bytes().await.map_err(|e| classify(url, e))?;
        Ok(ApiResponse {
            status,
            headers,
            url: final_url,
            body,
        })
    }
}

fn classify(url: &Url, source: reqwest::Error) -> TransportError {
    if source.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
            source,
        }
    } else {
        TransportError::Network {
            url: url.to_string(),
            source,
        }
    }
}

/// GET, HEAD, OPTIONS, PUT and DELETE can be replayed safely
pub fn is_idempotent(method: &Method) -> bool {
    *method == Method::GET
        || *method == Method::HEAD
        || *method == Method::OPTIONS
        || *method == Method::PUT
        || *method == Method::DELETE
}

/// Whether `error` on a `method` request warrants another attempt
pub fn should_retry(method: &Method, error: &TransportError) -> bool {
    match error {
        TransportError::Network { .. } => true,
        TransportError::Status { status, .. } => status.is_server_error() && is_idempotent(method),
        TransportError::Timeout { .. }
        | TransportError::InvalidUrl { .. }
        | TransportError::Client(_) => false,
    }
}
