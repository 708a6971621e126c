//! Event Bus Provider Port
//!
//! Defines the contract for catalog event publish/subscribe.
//!
//! ## Usage
//!
//! ```no_run
//! use catalog_domain::ports::infrastructure::EventBusProvider;
//! use catalog_domain::events::DomainEvent;
//! use catalog_domain::entities::ProductId;
//! use std::sync::Arc;
//!
//! async fn announce(bus: Arc<dyn EventBusProvider>) -> catalog_domain::Result<()> {
//!     bus.publish_event(DomainEvent::ProductChanged {
//!         product_id: ProductId::new(42),
//!         version: 3,
//!     })
//!     .await
//! }
//! ```

use crate::error::Result;
use crate::events::DomainEvent;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Boxed async stream of domain events
///
/// Hides the transport: implementations may back it with a broadcast
/// channel, a NATS subscription or anything else that yields events.
pub type DomainEventStream = Pin<Box<dyn Stream<Item = DomainEvent> + Send + 'static>>;

/// Event bus provider interface for typed event pub/sub
///
/// Delivery is treated as at-least-once with no ordering guarantee across
/// products. Subscribers must be idempotent.
#[async_trait]
pub trait EventBusProvider: Send + Sync {
    /// Publish a domain event to every subscriber
    ///
    /// "Published" means handed to the transport, not necessarily received.
    async fn publish_event(&self, event: DomainEvent) -> Result<()>;

    /// Subscribe to the event stream
    async fn subscribe_events(&self) -> Result<DomainEventStream>;

    /// Whether anyone is currently subscribed
    fn has_subscribers(&self) -> bool;

    /// Provider identifier (e.g., "tokio", "nats", "null")
    fn provider_name(&self) -> &str;
}
