//! Principal Service Configuration
//!
//! TOML-based configuration with `PRINCIPAL_*` environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub mongodb: MongoConfig,
    pub services: ServicesConfig,
    pub invites: InviteConfig,
    pub users: UserConfig,

    /// Run against in-memory stores instead of MongoDB
    pub dev_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            mongodb: MongoConfig::default(),
            services: ServicesConfig::default(),
            invites: InviteConfig::default(),
            users: UserConfig::default(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
        }
    }
}

/// MongoDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "principal".to_string(),
        }
    }
}

/// Upper bound for `services.retry_attempts`; retry delays double per attempt.
pub const MAX_RETRY_ATTEMPTS: u32 = 10;

/// Sibling microservice endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub license_url: String,
    pub email_url: String,
    pub tenant_url: String,
    /// HTTP client timeout in seconds
    pub timeout_secs: u64,
    /// Retry attempts for idempotent downstream calls
    pub retry_attempts: u32,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            license_url: "http://localhost:8081".to_string(),
            email_url: "http://localhost:8082".to_string(),
            tenant_url: "http://localhost:8083".to_string(),
            timeout_secs: 30,
            retry_attempts: 3,
        }
    }
}

/// Invitation policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Consumer mail hosts that can never be invited
    pub free_email_domains: Vec<String>,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            free_email_domains: [
                "gmail.com",
                "googlemail.com",
                "hotmail.com",
                "outlook.com",
                "live.com",
                "msn.com",
                "yahoo.com",
                "aol.com",
                "icloud.com",
                "mail.com",
                "gmx.com",
                "zoho.com",
                "yandex.com",
                "protonmail.com",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        }
    }
}

/// User creation policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Built-in on-prem tenant ids that cannot own users
    pub reserved_tenant_ids: Vec<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError("http.port must be non-zero".to_string()));
        }
        if !self.dev_mode && self.mongodb.uri.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "mongodb.uri is required unless dev_mode is enabled".to_string(),
            ));
        }
        if self.services.retry_attempts > MAX_RETRY_ATTEMPTS {
            return Err(ConfigError::ValidationError(format!(
                "services.retry_attempts must be at most {}, got {}",
                MAX_RETRY_ATTEMPTS, self.services.retry_attempts
            )));
        }
        for (name, url) in [
            ("services.license_url", &self.services.license_url),
            ("services.email_url", &self.services.email_url),
            ("services.tenant_url", &self.services.tenant_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# Principal Service Configuration
# Environment variables (PRINCIPAL_*) override these settings

dev_mode = false

[http]
port = 8080
host = "0.0.0.0"

[mongodb]
uri = "mongodb://localhost:27017"
database = "principal"

[services]
license_url = "http://localhost:8081"
email_url = "http://localhost:8082"
tenant_url = "http://localhost:8083"
timeout_secs = 30
retry_attempts = 3

[invites]
free_email_domains = ["gmail.com", "hotmail.com", "aol.com", "yahoo.com", "outlook.com"]

[users]
reserved_tenant_ids = []
"#
        .to_string()
    }
}
