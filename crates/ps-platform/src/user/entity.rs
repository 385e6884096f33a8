//! User Entity

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::repository::HasId;

/// A person with access to a tenant.
///
/// `email` and `user_name` are unique across all users, and so is a
/// non-empty `ldap_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    pub tenant_id: Uuid,

    pub first_name: String,

    pub last_name: String,

    pub email: String,

    pub user_name: String,

    /// Directory identity for LDAP-synchronized users
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_salt: Option<String>,

    #[serde(default)]
    pub is_locked: bool,

    /// Ids of the groups the user belongs to
    #[serde(default)]
    pub groups: BTreeSet<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access_date: Option<DateTime<Utc>>,
}

impl User {
    /// Copy without password material, for anything leaving the service.
    pub fn without_secrets(mut self) -> Self {
        self.password_hash = None;
        self.password_salt = None;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl HasId for User {
    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }

    fn entity_name() -> &'static str {
        "User"
    }

    fn collection_name() -> &'static str {
        "users"
    }
}
