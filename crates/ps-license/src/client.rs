//! License Manager HTTP client

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{AssignUserLicenseRequest, LicenseResponse, LicenseSummary, ReleaseUserLicenseRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Operations the Principal Service needs from the License Manager
#[async_trait]
pub trait LicenseApi: Send + Sync {
    async fn assign_user_license(&self, request: &AssignUserLicenseRequest) -> Result<LicenseResponse>;

    async fn release_user_license(&self, request: &ReleaseUserLicenseRequest) -> Result<LicenseResponse>;

    async fn tenant_license_summary(&self, tenant_id: Uuid) -> Result<Vec<LicenseSummary>>;
}

/// License Manager API client
///
/// Retries 5xx and 429 responses with exponential backoff.
#[derive(Debug, Clone)]
pub struct LicenseManagerClient {
    config: Arc<Config>,
    http_client: reqwest::Client,
}

impl LicenseManagerClient {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a request with automatic retries and error handling
    async fn execute<T>(&self, request: reqwest::Request) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;
        let attempts = self.config.retry_attempts.max(1);

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.config.retry_delay * (1 << (attempt - 1));
                debug!(attempt, ?delay, url = %request.url(), "Retrying license request");
                tokio::time::sleep(delay).await;
            }

            let request = request
                .try_clone()
                .ok_or_else(|| Error::Other("Request cannot be cloned".into()))?;

            match self.http_client.execute(request).await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body: T = response.json().await?;
                        return Ok(body);
                    }

                    let body = response.text().await.unwrap_or_default();
                    let error = Error::from_status(status, body);

                    if !error.is_retryable() {
                        return Err(error);
                    }

                    warn!(attempt, status = %status, "License Manager returned a retryable status");
                    last_error = Some(error);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "License Manager request failed");
                    last_error = Some(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| Error::Other("Request failed".into())))
    }
}

#[async_trait]
impl LicenseApi for LicenseManagerClient {
    async fn assign_user_license(&self, request: &AssignUserLicenseRequest) -> Result<LicenseResponse> {
        let http_request = self
            .http_client
            .post(self.config.url("/v1/licenses/users/assign"))
            .json(request)
            .build()?;
        self.execute(http_request).await
    }

    async fn release_user_license(&self, request: &ReleaseUserLicenseRequest) -> Result<LicenseResponse> {
        let http_request = self
            .http_client
            .post(self.config.url("/v1/licenses/users/release"))
            .json(request)
            .build()?;
        self.execute(http_request).await
    }

    async fn tenant_license_summary(&self, tenant_id: Uuid) -> Result<Vec<LicenseSummary>> {
        let http_request = self
            .http_client
            .get(self.config.url(&format!("/v1/licenses/tenants/{}/summary", tenant_id)))
            .build()?;
        self.execute(http_request).await
    }
}
