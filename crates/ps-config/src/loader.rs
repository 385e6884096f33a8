//! Configuration loader with file and environment variable support

use crate::{AppConfig, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "principal-service.toml",
    "./config/config.toml",
    "/etc/principal-service/config.toml",
];

/// Configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Load configuration from file (if found) with environment variable overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file() {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, |key| env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        if let Ok(path) = env::var("PRINCIPAL_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply `PRINCIPAL_*` overrides read through `lookup`.
///
/// Unparseable numeric or boolean values leave the current setting untouched.
pub(crate) fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    // HTTP
    if let Some(port) = lookup("PRINCIPAL_HTTP_PORT").and_then(|v| v.parse().ok()) {
        config.http.port = port;
    }
    if let Some(host) = lookup("PRINCIPAL_HTTP_HOST") {
        config.http.host = host;
    }

    // MongoDB
    if let Some(uri) = lookup("PRINCIPAL_MONGODB_URI") {
        config.mongodb.uri = uri;
    }
    if let Some(database) = lookup("PRINCIPAL_MONGODB_DATABASE") {
        config.mongodb.database = database;
    }

    // Downstream services
    if let Some(url) = lookup("PRINCIPAL_LICENSE_URL") {
        config.services.license_url = url;
    }
    if let Some(url) = lookup("PRINCIPAL_EMAIL_URL") {
        config.services.email_url = url;
    }
    if let Some(url) = lookup("PRINCIPAL_TENANT_URL") {
        config.services.tenant_url = url;
    }
    if let Some(timeout) = lookup("PRINCIPAL_SERVICES_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        config.services.timeout_secs = timeout;
    }
    if let Some(attempts) = lookup("PRINCIPAL_SERVICES_RETRY_ATTEMPTS").and_then(|v| v.parse().ok()) {
        config.services.retry_attempts = attempts;
    }

    // Policies
    if let Some(domains) = lookup("PRINCIPAL_FREE_EMAIL_DOMAINS") {
        config.invites.free_email_domains = split_list(&domains);
    }
    if let Some(tenants) = lookup("PRINCIPAL_RESERVED_TENANT_IDS") {
        config.users.reserved_tenant_ids = split_list(&tenants);
    }

    // General
    if let Some(dev_mode) = lookup("PRINCIPAL_DEV_MODE").and_then(|v| v.parse().ok()) {
        config.dev_mode = dev_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("PRINCIPAL_HTTP_PORT", "9090"),
                ("PRINCIPAL_MONGODB_DATABASE", "principal_test"),
                ("PRINCIPAL_LICENSE_URL", "http://license:80"),
                ("PRINCIPAL_FREE_EMAIL_DOMAINS", "gmail.com, aol.com ,,"),
                ("PRINCIPAL_DEV_MODE", "true"),
            ]),
        );

        assert_eq!(config.http.port, 9090);
        assert_eq!(config.mongodb.database, "principal_test");
        assert_eq!(config.services.license_url, "http://license:80");
        assert_eq!(config.invites.free_email_domains, vec!["gmail.com", "aol.com"]);
        assert!(config.dev_mode);
    }

    #[test]
    fn test_unparseable_values_are_ignored() {
        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            lookup_from(&[
                ("PRINCIPAL_HTTP_PORT", "not-a-port"),
                ("PRINCIPAL_DEV_MODE", "yes"),
            ]),
        );

        assert_eq!(config.http.port, 8080);
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("principal.toml");
        std::fs::write(&path, "[mongodb]\ndatabase = \"from_file\"\n").unwrap();

        let config = ConfigLoader::with_path(&path).load().unwrap();
        assert_eq!(config.mongodb.database, "from_file");
    }
}
