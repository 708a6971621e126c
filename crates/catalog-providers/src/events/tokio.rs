//! Tokio Broadcast Event Bus Provider
//!
//! In-process bus over a `tokio::sync::broadcast` channel. A subscriber
//! that falls behind by more than the channel capacity loses the oldest
//! events; the stream reports that as [`DomainEvent::StreamLagged`] so the
//! consumer can reconcile instead of silently missing changes.
//!
//! ## Example
//!
//! ```ignore
//! use catalog_providers::events::TokioEventBusProvider;
//!
//! let bus = TokioEventBusProvider::new();
//! let stream = bus.subscribe_events().await?;
//! bus.publish_event(DomainEvent::ResyncRequested { product_id: None }).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use catalog_domain::error::Result;
use catalog_domain::events::DomainEvent;
use catalog_domain::ports::{DomainEventStream, EventBusProvider};
use futures::stream;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::constants::EVENT_BUS_DEFAULT_CAPACITY;

/// Event bus provider using tokio broadcast channels
#[derive(Clone)]
pub struct TokioEventBusProvider {
    sender: Arc<broadcast::Sender<DomainEvent>>,
    capacity: usize,
}

impl TokioEventBusProvider {
    /// Bus with the default capacity (1024)
    pub fn new() -> Self {
        Self::with_capacity(EVENT_BUS_DEFAULT_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
            capacity,
        }
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TokioEventBusProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokioEventBusProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioEventBusProvider")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

#[async_trait]
impl EventBusProvider for TokioEventBusProvider {
    async fn publish_event(&self, event: DomainEvent) -> Result<()> {
        let name = event.name();
        match self.sender.send(event) {
            Ok(count) => debug!(event = name, subscribers = count, "event published"),
            Err(_) => debug!(event = name, "event published without subscribers"),
        }
        Ok(())
    }

    async fn subscribe_events(&self) -> Result<DomainEventStream> {
        let receiver = self.sender.subscribe();

        let stream = stream::unfold(receiver, |mut rx| async move {
            match rx.recv().await {
                Ok(event) => Some((event, rx)),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event stream lagged");
                    Some((DomainEvent::StreamLagged { skipped }, rx))
                }
                Err(broadcast::error::RecvError::Closed) => None,
            }
        });

        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }

    fn provider_name(&self) -> &str {
        "tokio"
    }
}
