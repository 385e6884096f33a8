//! Event publishing
//!
//! Publishing is fire-and-forget: use cases hand a [`PublishedEvent`] to an
//! [`EventPublisher`] and carry on. Delivery problems are logged, never
//! returned to the caller.

use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use mongodb::{Collection, Database};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, info, warn};

use super::DomainEvent;

/// Envelope handed to publishers and stored in the `events` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedEvent {
    pub id: String,
    #[serde(rename = "type")]
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
    pub data: Value,
}

impl PublishedEvent {
    pub fn from_event<E: DomainEvent + ?Sized>(event: &E) -> Self {
        Self {
            id: event.event_id().to_string(),
            event_type: event.event_type().to_string(),
            spec_version: event.spec_version().to_string(),
            source: event.source().to_string(),
            subject: event.subject().to_string(),
            time: event.time(),
            execution_id: event.execution_id().to_string(),
            correlation_id: event.correlation_id().to_string(),
            causation_id: event.causation_id().map(String::from),
            principal_id: event.principal_id().to_string(),
            message_group: event.message_group().to_string(),
            data: serde_json::from_str(&event.to_data_json()).unwrap_or(Value::Null),
        }
    }
}

pub trait EventPublisher: Send + Sync {
    /// Enqueue an event. Never blocks and never fails the caller.
    fn publish(&self, event: PublishedEvent);
}

impl<'a> dyn EventPublisher + 'a {
    pub fn publish_event<E: DomainEvent>(&self, event: &E) {
        self.publish(PublishedEvent::from_event(event));
    }
}

/// Publishes onto a bounded channel drained by a background sink.
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: mpsc::Sender<PublishedEvent>,
}

impl ChannelEventPublisher {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<PublishedEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl EventPublisher for ChannelEventPublisher {
    fn publish(&self, event: PublishedEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(event_id = %event.id, event_type = %event.event_type, "Event queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(event_id = %event.id, event_type = %event.event_type, "Event sink stopped, dropping event");
            }
        }
    }
}

/// Background task persisting published events to MongoDB.
pub struct MongoEventSink {
    collection: Collection<Document>,
    receiver: mpsc::Receiver<PublishedEvent>,
}

impl MongoEventSink {
    pub fn new(db: &Database, receiver: mpsc::Receiver<PublishedEvent>) -> Self {
        Self {
            collection: db.collection("events"),
            receiver,
        }
    }

    /// Run until every publisher has been dropped.
    pub async fn run(mut self) {
        info!("Event sink started");
        while let Some(event) = self.receiver.recv().await {
            let document = match serde_json::to_value(&event)
                .map_err(|e| e.to_string())
                .and_then(|v| bson::to_document(&v).map_err(|e| e.to_string()))
            {
                Ok(document) => document,
                Err(e) => {
                    error!(event_id = %event.id, error = %e, "Failed to encode event");
                    continue;
                }
            };

            match self.collection.insert_one(document).await {
                Ok(_) => debug!(event_id = %event.id, event_type = %event.event_type, "Event stored"),
                Err(e) => error!(event_id = %event.id, error = %e, "Failed to store event"),
            }
        }
        info!("Event sink stopped");
    }
}

/// Background task that only logs events (dev mode).
pub struct LoggingEventSink {
    receiver: mpsc::Receiver<PublishedEvent>,
}

impl LoggingEventSink {
    pub fn new(receiver: mpsc::Receiver<PublishedEvent>) -> Self {
        Self { receiver }
    }

    pub async fn run(mut self) {
        while let Some(event) = self.receiver.recv().await {
            info!(
                event_id = %event.id,
                event_type = %event.event_type,
                subject = %event.subject,
                "Domain event"
            );
        }
    }
}

/// Records events in memory.
#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Mutex<Vec<PublishedEvent>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.event_type.clone()).collect()
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: PublishedEvent) {
        self.events.lock().push(event);
    }
}
