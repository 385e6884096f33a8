//! User Domain Events

use serde::Serialize;
use uuid::Uuid;

use crate::impl_domain_event;
use crate::usecase::{EventMetadata, ExecutionContext};
use crate::user::entity::User;

const AGGREGATE: &str = "user";

/// Event emitted when a new user is created.
///
/// Never carries password material.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_id: Option<String>,
}

impl_domain_event!(UserCreated);

impl UserCreated {
    pub fn new(ctx: &ExecutionContext, user_id: Uuid, user: &User) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "created", user_id),
            user_id,
            tenant_id: user.tenant_id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            ldap_id: user.ldap_id.clone(),
        }
    }
}

/// Event emitted when a user's profile changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdated {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub user_id: Uuid,
    pub tenant_id: Uuid,
    /// Serialized names of the fields that changed
    pub changed_fields: Vec<String>,
}

impl_domain_event!(UserUpdated);

impl UserUpdated {
    pub fn new(ctx: &ExecutionContext, user_id: Uuid, tenant_id: Uuid, changed_fields: Vec<String>) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "updated", user_id),
            user_id,
            tenant_id,
            changed_fields,
        }
    }
}

/// Event emitted when a user is locked or unlocked.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLockChanged {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub user_id: Uuid,
    pub is_locked: bool,
    /// Why the lock changed, e.g. `licenseAssignmentFailed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl_domain_event!(UserLockChanged);

impl UserLockChanged {
    pub fn new(ctx: &ExecutionContext, user_id: Uuid, is_locked: bool, reason: Option<&str>) -> Self {
        let action = if is_locked { "locked" } else { "unlocked" };
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, action, user_id),
            user_id,
            is_locked,
            reason: reason.map(String::from),
        }
    }
}

/// Event emitted when a user is deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeleted {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub user_id: Uuid,
}

impl_domain_event!(UserDeleted);

impl UserDeleted {
    pub fn new(ctx: &ExecutionContext, user_id: Uuid) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "deleted", user_id),
            user_id,
        }
    }
}
