//! Wire types exchanged with the License Manager service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome category reported by the License Manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LicenseResultCode {
    Success,
    NoLicenseAvailable,
    LicenseAlreadyAssigned,
    LicenseNotAssigned,
    UserNotFound,
    TenantNotFound,
    Failed,
    /// Any code this client does not know about
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseResponse {
    pub result_code: LicenseResultCode,
    #[serde(default)]
    pub message: Option<String>,
}

impl LicenseResponse {
    pub fn is_success(&self) -> bool {
        self.result_code == LicenseResultCode::Success
    }
}

/// Request to allocate a license seat to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignUserLicenseRequest {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    /// Specific license type; the tenant default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_type: Option<String>,
}

impl AssignUserLicenseRequest {
    pub fn new(tenant_id: Uuid, user_id: Uuid) -> Self {
        Self {
            tenant_id,
            user_id,
            license_type: None,
        }
    }

    pub fn with_license_type(mut self, license_type: impl Into<String>) -> Self {
        self.license_type = Some(license_type.into());
        self
    }
}

/// Request to return a user's license seat to the pool
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseUserLicenseRequest {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
}

/// Seat usage for one license type of a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSummary {
    pub license_type: String,
    pub total: u32,
    pub assigned: u32,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LicenseSummary {
    pub fn available(&self) -> u32 {
        self.total.saturating_sub(self.assigned)
    }
}
