//! Domain Event Trait
//!
//! Base trait for all domain events. Events follow the CloudEvents
//! structure with additional fields for tracing and ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExecutionContext;

/// Source recorded on every event emitted by this service
pub const EVENT_SOURCE: &str = "principal-service";

/// Base trait for all domain events.
///
/// Domain events are facts in the past tense: `UserCreated`, not `CreateUser`.
///
/// # Event Type Format
///
/// `principal:{aggregate}:{action}`, e.g. `principal:user:created`
///
/// # Subject Format
///
/// `principal.{aggregate}.{id}`
///
/// # Message Group
///
/// Events in the same message group are processed in order.
/// Format: `principal:{aggregate}:{id}`
pub trait DomainEvent: Send + Sync {
    fn event_id(&self) -> &str;

    fn event_type(&self) -> &str;

    fn spec_version(&self) -> &str;

    fn source(&self) -> &str;

    fn subject(&self) -> &str;

    fn time(&self) -> DateTime<Utc>;

    fn execution_id(&self) -> &str;

    fn correlation_id(&self) -> &str;

    fn causation_id(&self) -> Option<&str>;

    /// Principal who initiated the action that produced this event.
    fn principal_id(&self) -> &str;

    fn message_group(&self) -> &str;

    /// Serialize the event-specific data payload to JSON.
    fn to_data_json(&self) -> String;
}

/// Common metadata for domain events.
///
/// Event structs hold this in a `metadata` field and delegate the trait
/// methods to it through [`impl_domain_event!`](crate::impl_domain_event).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    pub event_id: String,
    pub event_type: String,
    pub spec_version: String,
    pub source: String,
    pub subject: String,
    pub time: DateTime<Utc>,
    pub execution_id: String,
    pub correlation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<String>,
    pub principal_id: String,
    pub message_group: String,
}

impl EventMetadata {
    /// Metadata for an event about one aggregate instance.
    pub fn for_aggregate(
        ctx: &ExecutionContext,
        aggregate: &str,
        action: &str,
        aggregate_id: Uuid,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: format!("principal:{}:{}", aggregate, action),
            spec_version: "1.0".to_string(),
            source: EVENT_SOURCE.to_string(),
            subject: format!("principal.{}.{}", aggregate, aggregate_id),
            time: Utc::now(),
            execution_id: ctx.execution_id.clone(),
            correlation_id: ctx.correlation_id.clone(),
            causation_id: ctx.causation_id.clone(),
            principal_id: ctx.principal_id.clone(),
            message_group: format!("principal:{}:{}", aggregate, aggregate_id),
        }
    }
}

/// Helper macro for implementing the DomainEvent trait.
///
/// Delegates to an `EventMetadata` field named `metadata`.
///
/// ```ignore
/// #[derive(Serialize)]
/// pub struct GroupDeleted {
///     #[serde(flatten)]
///     pub metadata: EventMetadata,
///     pub group_id: Uuid,
/// }
///
/// impl_domain_event!(GroupDeleted);
/// ```
#[macro_export]
macro_rules! impl_domain_event {
    ($event_type:ty) => {
        impl $crate::usecase::DomainEvent for $event_type {
            fn event_id(&self) -> &str {
                &self.metadata.event_id
            }

            fn event_type(&self) -> &str {
                &self.metadata.event_type
            }

            fn spec_version(&self) -> &str {
                &self.metadata.spec_version
            }

            fn source(&self) -> &str {
                &self.metadata.source
            }

            fn subject(&self) -> &str {
                &self.metadata.subject
            }

            fn time(&self) -> chrono::DateTime<chrono::Utc> {
                self.metadata.time
            }

            fn execution_id(&self) -> &str {
                &self.metadata.execution_id
            }

            fn correlation_id(&self) -> &str {
                &self.metadata.correlation_id
            }

            fn causation_id(&self) -> Option<&str> {
                self.metadata.causation_id.as_deref()
            }

            fn principal_id(&self) -> &str {
                &self.metadata.principal_id
            }

            fn message_group(&self) -> &str {
                &self.metadata.message_group
            }

            fn to_data_json(&self) -> String {
                serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
            }
        }
    };
}
