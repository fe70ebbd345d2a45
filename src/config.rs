//! API configuration.
//!
//! Use the builder methods to customize, or [`ApiConfig::from_env`] to read
//! the `CHATKIT_*` environment variables.

use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use crate::traits::Headers;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str =
    "https://us-central1-emma-ai-2e0d5.cloudfunctions.net/aiRolePlayApi";

/// Environment variable holding the API key (required by `from_env`).
pub const ENV_API_KEY: &str = "CHATKIT_API_KEY";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "CHATKIT_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CHATKIT_TIMEOUT_SECS";

/// Configuration for talking to the backend.
///
/// # Example
///
/// ```ignore
/// use chatkit::config::ApiConfig;
///
/// let config = ApiConfig::new("secret")
///     .with_base_url("http://localhost:8080")
///     .with_header("X-Client", "cli");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are appended to
    pub base_url: String,
    /// Bearer token sent with every request
    pub api_key: String,
    /// Extra headers sent with every request
    pub extra_headers: Headers,
    /// Transport timeout for a whole request (default: 60s)
    pub request_timeout: Duration,
    /// Capacity of the per-call stream event channel (default: 32)
    pub stream_buffer: usize,
}

impl ApiConfig {
    /// Create a config for the default backend with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            extra_headers: Headers::new(),
            request_timeout: Duration::from_secs(60),
            stream_buffer: 32,
        }
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Add a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the stream channel capacity (minimum 1).
    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }

    /// Build a config from `CHATKIT_API_KEY`, `CHATKIT_BASE_URL` and
    /// `CHATKIT_TIMEOUT_SECS`.
    ///
    /// A missing or empty API key is a configuration error. An unparsable
    /// timeout is ignored with a warning.
    pub fn from_env() -> ApiResult<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ApiError::ConfigurationMissing(ENV_API_KEY))?;

        let mut config = Self::new(api_key);

        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config = config.with_request_timeout(Duration::from_secs(secs)),
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_TIMEOUT_SECS, raw, e),
            }
        }

        Ok(config)
    }

    /// Headers for every request: JSON content type, bearer auth, extras.
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        );
        for (name, value) in &self.extra_headers {
            headers.insert(name.clone(), value.clone());
        }
        headers
    }

    /// Full URL for an endpoint path such as `/role/chat`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
