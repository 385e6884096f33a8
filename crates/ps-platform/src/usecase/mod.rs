//! Use Case Infrastructure
//!
//! Provides the foundational patterns for implementing use cases:
//! - `UseCaseError` - categorized error types for consistent handling
//! - `DomainEvent` - trait for domain events with CloudEvents structure
//! - `ExecutionContext` - tracing and principal context for use case execution
//! - `EventPublisher` - fire-and-forget hand-off of published events

pub mod error;
pub mod domain_event;
pub mod execution_context;
pub mod publisher;

pub use error::UseCaseError;
pub use domain_event::{DomainEvent, EventMetadata};
pub use execution_context::ExecutionContext;
pub use publisher::{
    ChannelEventPublisher, EventPublisher, InMemoryEventPublisher, LoggingEventSink, MongoEventSink,
    PublishedEvent,
};
