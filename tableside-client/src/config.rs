//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::ClientResult;
use crate::client::NetworkHttpClient;

/// Default backend
pub const DEFAULT_BASE_URL: &str = "https://elitecafe.devsomeware.com";

/// Retry schedule for full-order updates
///
/// Attempt `n` (1-based) that fails on transport is followed by a pause of
/// `base_delay * 2^(n-1)` before attempt `n + 1`; the last attempt is not
/// followed by a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Pause after the given failed attempt (1s, 2s, 4s, ... by default)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Client configuration for connecting to the restaurant backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "https://elitecafe.devsomeware.com")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session token
    pub data_dir: PathBuf,

    /// Retry schedule for full-order updates
    pub update_retry: RetryPolicy,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            data_dir: PathBuf::from("./data"),
            update_retry: RetryPolicy::default(),
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    ///
    /// - `TABLESIDE_BASE_URL`
    /// - `TABLESIDE_TIMEOUT_SECS`
    /// - `TABLESIDE_DATA_DIR`
    pub fn from_env() -> Self {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env file loaded: {e}");
        }

        let mut config = Self::new(
            std::env::var("TABLESIDE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        );
        if let Some(timeout) = std::env::var("TABLESIDE_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        if let Ok(dir) = std::env::var("TABLESIDE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the token directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the full-order update retry schedule
    pub fn with_update_retry(mut self, policy: RetryPolicy) -> Self {
        self.update_retry = policy;
        self
    }

    /// Create a network HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::with_timeout(&self.base_url, Duration::from_secs(self.timeout))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
