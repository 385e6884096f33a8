//! Group Domain Events

use serde::Serialize;
use uuid::Uuid;

use crate::impl_domain_event;
use crate::usecase::{EventMetadata, ExecutionContext};

const AGGREGATE: &str = "group";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreated {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub group_id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
}

impl_domain_event!(GroupCreated);

impl GroupCreated {
    pub fn new(ctx: &ExecutionContext, group_id: Uuid, tenant_id: Uuid, name: &str) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "created", group_id),
            group_id,
            tenant_id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdated {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub group_id: Uuid,
    pub name: String,
}

impl_domain_event!(GroupUpdated);

impl GroupUpdated {
    pub fn new(ctx: &ExecutionContext, group_id: Uuid, name: &str) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "updated", group_id),
            group_id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeleted {
    #[serde(skip)]
    pub metadata: EventMetadata,

    pub group_id: Uuid,
    /// Users whose membership was removed
    pub members_removed: usize,
}

impl_domain_event!(GroupDeleted);

impl GroupDeleted {
    pub fn new(ctx: &ExecutionContext, group_id: Uuid, members_removed: usize) -> Self {
        Self {
            metadata: EventMetadata::for_aggregate(ctx, AGGREGATE, "deleted", group_id),
            group_id,
            members_removed,
        }
    }
}
