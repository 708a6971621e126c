//! Infrastructure Ports

/// Event bus port
pub mod events;

pub use events::{DomainEventStream, EventBusProvider};
