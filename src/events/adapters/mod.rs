//! Event publisher adapters.

pub mod memory;

pub use memory::InMemoryEventPublisher;
