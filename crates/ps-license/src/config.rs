//! Client configuration

use std::time::Duration;

/// Configuration for the License Manager client
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the License Manager service
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Maximum attempts per request (including the first)
    pub retry_attempts: u32,

    /// Initial retry delay, doubled on each further attempt
    pub retry_delay: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a new configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(100),
            user_agent: format!("ps-license/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry configuration
    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay = delay;
        self
    }

    /// Set custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:8081")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = Config::new("http://license:8081/");
        assert_eq!(config.url("/v1/x"), "http://license:8081/v1/x");
    }
}
