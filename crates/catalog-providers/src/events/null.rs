//! Null Event Bus Provider
//!
//! Accepts and drops every event. Subscriptions stay open and never yield,
//! which keeps a consumer parked until shutdown.

use async_trait::async_trait;
use catalog_domain::error::Result;
use catalog_domain::events::DomainEvent;
use catalog_domain::ports::{DomainEventStream, EventBusProvider};
use futures::stream;
use tracing::trace;

/// Event bus that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventBusProvider;

impl NullEventBusProvider {
    /// Create the bus
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventBusProvider for NullEventBusProvider {
    async fn publish_event(&self, event: DomainEvent) -> Result<()> {
        trace!(event = event.name(), "event discarded");
        Ok(())
    }

    async fn subscribe_events(&self) -> Result<DomainEventStream> {
        Ok(Box::pin(stream::pending()))
    }

    fn has_subscribers(&self) -> bool {
        false
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
