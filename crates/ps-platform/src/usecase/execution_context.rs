//! Execution Context
//!
//! Carries tracing IDs and principal information through the execution of
//! a use case. Used to populate domain event metadata.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::domain_event::DomainEvent;

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique ID for this execution (generated)
    pub execution_id: String,
    /// ID for distributed tracing (usually from original request)
    pub correlation_id: String,
    /// ID of the parent event that caused this execution (if any)
    pub causation_id: Option<String>,
    /// ID of the principal performing the action
    pub principal_id: String,
    pub initiated_at: DateTime<Utc>,
}

fn new_execution_id() -> String {
    format!("exec-{}", Uuid::new_v4().simple())
}

impl ExecutionContext {
    /// Create a new execution context for a fresh request.
    ///
    /// The correlation id starts out equal to the execution id.
    pub fn create(principal_id: impl Into<String>) -> Self {
        let exec_id = new_execution_id();
        Self {
            execution_id: exec_id.clone(),
            correlation_id: exec_id,
            causation_id: None,
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }

    /// Create a new execution context with a correlation ID from upstream.
    pub fn with_correlation(
        principal_id: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            execution_id: new_execution_id(),
            correlation_id: correlation_id.into(),
            causation_id: None,
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }

    /// Create a new execution context reacting to a parent event.
    pub fn from_parent_event<E: DomainEvent>(parent: &E, principal_id: impl Into<String>) -> Self {
        Self {
            execution_id: new_execution_id(),
            correlation_id: parent.correlation_id().to_string(),
            causation_id: Some(parent.event_id().to_string()),
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }
}
