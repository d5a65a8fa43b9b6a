//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::retry::RetryConfig;

/// Default upstream employee endpoint
pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream employee endpoint, e.g. `http://localhost:8112/api/v1/employee`
    pub base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Per-request timeout for upstream calls, in seconds
    pub request_timeout: u64,
    /// Backoff policy for retryable upstream failures
    pub retry: RetryConfig,
    /// Maximum number of entries per cache namespace
    pub cache_max_entries: usize,
    /// Cache entry lifetime in seconds, 0 disables expiry
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `EMPLOYEE_API_BASE_URL` - Upstream endpoint (default: `http://localhost:8112/api/v1/employee`)
    /// - `SERVER_PORT` - HTTP server port (default: 8111)
    /// - `REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: 10)
    /// - `RETRY_MAX_ATTEMPTS` - Attempts per upstream call (default: 8)
    /// - `RETRY_BASE_DELAY_MS` - First backoff delay (default: 2000)
    /// - `RETRY_MULTIPLIER` - Backoff growth factor (default: 2)
    /// - `RETRY_MAX_DELAY_MS` - Backoff cap (default: 20000)
    /// - `RETRY_JITTER` - Randomize backoff delays (default: true)
    /// - `CACHE_MAX_ENTRIES` - Entries per cache namespace (default: 1000)
    /// - `CACHE_TTL_SECS` - Cache entry lifetime, 0 = never expire (default: 300)
    /// - `CLEANUP_INTERVAL_SECS` - Expired-entry sweep frequency (default: 30)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let retry_defaults = RetryConfig::default();

        Self {
            base_url: env::var("EMPLOYEE_API_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            request_timeout: env_or("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            retry: RetryConfig {
                max_attempts: env_or("RETRY_MAX_ATTEMPTS", retry_defaults.max_attempts).max(1),
                base_delay: Duration::from_millis(env_or(
                    "RETRY_BASE_DELAY_MS",
                    retry_defaults.base_delay.as_millis() as u64,
                )),
                multiplier: env_or("RETRY_MULTIPLIER", retry_defaults.multiplier),
                max_delay: Duration::from_millis(env_or(
                    "RETRY_MAX_DELAY_MS",
                    retry_defaults.max_delay.as_millis() as u64,
                )),
                jitter: env_or("RETRY_JITTER", retry_defaults.jitter),
            },
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL_SECS", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
        }
    }

    /// Cache entry lifetime, `None` when expiry is disabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl > 0).then(|| Duration::from_secs(self.cache_ttl))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            server_port: 8111,
            request_timeout: 10,
            retry: RetryConfig::default(),
            cache_max_entries: 1000,
            cache_ttl: 300,
            cleanup_interval: 30,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
