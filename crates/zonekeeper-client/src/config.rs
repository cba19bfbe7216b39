//! Client configuration types.

use std::time::Duration;

/// The Directory API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side pacing so bursts stay under the Directory's request quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,

    /// Requests allowed back-to-back before pacing kicks in
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimitConfig {
    /// 1200 requests per five minutes, as the Directory allows per token
    #[must_use]
    pub const fn new() -> Self {
        Self {
            requests_per_second: 4,
            burst: 10,
        }
    }

    /// Set the sustained rate
    #[must_use]
    pub const fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Set the burst size
    #[must_use]
    pub const fn burst(mut self, burst: u32) -> Self {
        self.burst = burst;
        self
    }
}

/// Everything needed to build a [`crate::DirectoryClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API token sent as a bearer credential
    pub api_token: String,

    /// Base URL of the Directory API
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Client-side rate limit
    pub rate_limit: RateLimitConfig,
}

impl ClientConfig {
    /// Configuration with default endpoint, timeout and rate limit
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Override the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the rate limit
    #[must_use]
    pub const fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("token");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.rate_limit.requests_per_second, 4);
        assert_eq!(config.rate_limit.burst, 10);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("token")
            .base_url("http://127.0.0.1:9000")
            .timeout(Duration::from_secs(5))
            .rate_limit(RateLimitConfig::new().requests_per_second(50).burst(100));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.rate_limit.burst, 100);
    }
}
