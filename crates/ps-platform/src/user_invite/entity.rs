//! User Invite Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::repository::HasId;

/// A pending invitation to join a tenant.
///
/// Email is the natural key, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInvite {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub tenant_id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    /// Set each time an invitation email is accepted by the Email service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_invited_date: Option<DateTime<Utc>>,
}

impl UserInvite {
    pub fn new(tenant_id: Uuid, request: &InviteRequest) -> Self {
        Self {
            id: None,
            tenant_id,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email.clone(),
            last_invited_date: None,
        }
    }
}

impl HasId for UserInvite {
    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn entity_name() -> &'static str {
        "UserInvite"
    }

    fn collection_name() -> &'static str {
        "userInvites"
    }
}

/// One entry of a submitted batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
}

impl InviteRequest {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

/// Outcome for one submitted invite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InviteStatus {
    Success,
    UserEmailFormatInvalid,
    UserEmailDomainFree,
    UserEmailNotDomainAllowed,
    DuplicateUserEmail,
    DuplicateUserEntry,
    /// Resend only: no invite exists for the email
    UserNotExist,
}

/// Per-request result returned for every submitted invite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_invited_date: Option<DateTime<Utc>>,
    pub status: InviteStatus,
}

impl InviteResult {
    pub fn from_request(request: &InviteRequest, tenant_id: Option<Uuid>, status: InviteStatus) -> Self {
        Self {
            id: None,
            tenant_id,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email.clone(),
            last_invited_date: None,
            status,
        }
    }

    pub fn from_invite(invite: &UserInvite, status: InviteStatus) -> Self {
        Self {
            id: invite.id,
            tenant_id: Some(invite.tenant_id),
            first_name: invite.first_name.clone(),
            last_name: invite.last_name.clone(),
            email: invite.email.clone(),
            last_invited_date: invite.last_invited_date,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(InviteStatus::UserEmailNotDomainAllowed).unwrap(),
            "userEmailNotDomainAllowed"
        );
        assert_eq!(serde_json::to_value(InviteStatus::UserNotExist).unwrap(), "userNotExist");
    }

    #[test]
    fn test_request_without_names() {
        let request: InviteRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert!(request.first_name.is_empty());
    }
}
