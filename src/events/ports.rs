//! Port contract for publishing domain events.

use super::EventEnvelope;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by event publishers.
#[derive(Debug, Clone, Error)]
pub enum EventPublishError {
    /// Delivery failed.
    #[error("event delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventPublishError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}

/// Event delivery contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one committed event.
    ///
    /// # Errors
    ///
    /// Returns [`EventPublishError`] when the event cannot be delivered.
    async fn publish(&self, envelope: &EventEnvelope) -> Result<(), EventPublishError>;
}

/// Publishes an event after its change has been committed.
///
/// The change is already persisted, so delivery failures are logged rather
/// than returned.
pub async fn publish_committed<P>(publisher: &P, envelope: EventEnvelope)
where
    P: EventPublisher + ?Sized,
{
    if let Err(err) = publisher.publish(&envelope).await {
        tracing::warn!(
            event_id = %envelope.event_id(),
            event_type = envelope.event().event_type(),
            error = %err,
            "failed to publish committed domain event"
        );
    }
}
