//! Domain events published after committed changes.

pub mod adapters;
mod event;
mod ports;

pub use event::{DomainEvent, EventEnvelope};
#[cfg(test)]
pub use ports::MockEventPublisher;
pub use ports::{EventPublishError, EventPublisher, publish_committed};
