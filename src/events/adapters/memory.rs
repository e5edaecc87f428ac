//! In-memory event publisher that records every event.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::events::{EventEnvelope, EventPublishError, EventPublisher};

/// Thread-safe publisher retaining published events in order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventPublisher {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventPublisher {
    /// Creates an empty publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the published events.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublishError::Delivery`] if the internal lock is
    /// poisoned.
    pub fn published(&self) -> Result<Vec<EventEnvelope>, EventPublishError> {
        let events = self
            .events
            .read()
            .map_err(|err| EventPublishError::delivery(std::io::Error::other(err.to_string())))?;
        Ok(events.clone())
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), EventPublishError> {
        let mut events = self
            .events
            .write()
            .map_err(|err| EventPublishError::delivery(std::io::Error::other(err.to_string())))?;
        events.push(envelope.clone());
        Ok(())
    }
}
