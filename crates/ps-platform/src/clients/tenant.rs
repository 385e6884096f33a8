//! Tenant service client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::shared::error::{PlatformError, Result};

#[async_trait]
pub trait TenantApi: Send + Sync {
    /// Email hosts a tenant accepts invitations for, lower-cased.
    async fn allowed_domains(&self, tenant_id: Uuid) -> Result<Vec<String>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllowedDomainsResponse {
    #[serde(default)]
    domains: Vec<String>,
}

pub struct HttpTenantClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTenantClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http_client: super::build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TenantApi for HttpTenantClient {
    async fn allowed_domains(&self, tenant_id: Uuid) -> Result<Vec<String>> {
        let url = format!("{}/v1/tenants/{}/domains", self.base_url, tenant_id);
        let response = self.http_client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PlatformError::not_found("Tenant", tenant_id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::downstream(format!(
                "Tenant service returned {} for {}: {}",
                status, tenant_id, body
            )));
        }

        let body: AllowedDomainsResponse = response.json().await?;
        debug!(%tenant_id, count = body.domains.len(), "Loaded tenant domains");
        Ok(body
            .domains
            .into_iter()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect())
    }
}
