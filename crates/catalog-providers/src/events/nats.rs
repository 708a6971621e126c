//! NATS Event Bus Provider
//!
//! Distributed bus: events are JSON-encoded and published to one subject.
//! Core NATS is at-most-once per connection; combined with redelivery by
//! upstream publishers the coordinator still sees at-least-once semantics
//! and deduplicates by version.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_nats::Client;
use async_trait::async_trait;
use catalog_domain::error::{Error, Result};
use catalog_domain::events::DomainEvent;
use catalog_domain::ports::{DomainEventStream, EventBusProvider};
use futures::{StreamExt, stream};
use tracing::{debug, info, warn};

use crate::constants::NATS_DEFAULT_SUBJECT;

/// Event bus provider backed by NATS
pub struct NatsEventBusProvider {
    client: Client,
    subject: String,
    subscribers: Arc<AtomicUsize>,
}

impl NatsEventBusProvider {
    /// Connect using the default subject
    pub async fn new(url: &str) -> Result<Self> {
        Self::with_subject(url, NATS_DEFAULT_SUBJECT).await
    }

    /// Connect and publish to `subject`
    pub async fn with_subject(url: &str, subject: &str) -> Result<Self> {
        info!(url, subject, "connecting to NATS");
        let client = async_nats::connect(url).await.map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to connect to NATS at {url}"), e)
        })?;
        info!(url, "connected to NATS");

        Ok(Self {
            client,
            subject: subject.to_string(),
            subscribers: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Subject events are published to
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl std::fmt::Debug for NatsEventBusProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsEventBusProvider")
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

/// Decrements the subscriber count when the stream is dropped
struct SubscriberGuard(Arc<AtomicUsize>);

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl EventBusProvider for NatsEventBusProvider {
    async fn publish_event(&self, event: DomainEvent) -> Result<()> {
        let payload = serde_json::to_vec(&event)?;
        self.client
            .publish(self.subject.clone(), payload.into())
            .await
            .map_err(|e| Error::infrastructure_with_source("Failed to publish event to NATS", e))?;
        debug!(event = event.name(), subject = %self.subject, "event published to NATS");
        Ok(())
    }

    async fn subscribe_events(&self) -> Result<DomainEventStream> {
        let subscriber = self
            .client
            .subscribe(self.subject.clone())
            .await
            .map_err(|e| {
                Error::infrastructure_with_source(
                    format!("Failed to subscribe to NATS subject '{}'", self.subject),
                    e,
                )
            })?;
        self.subscribers.fetch_add(1, Ordering::Relaxed);
        let guard = SubscriberGuard(Arc::clone(&self.subscribers));

        let stream = stream::unfold((subscriber, guard), |(mut sub, guard)| async move {
            loop {
                let message = sub.next().await?;
                match serde_json::from_slice::<DomainEvent>(&message.payload) {
                    Ok(event) => return Some((event, (sub, guard))),
                    Err(e) => warn!(error = %e, "skipping undecodable NATS message"),
                }
            }
        });

        Ok(Box::pin(stream))
    }

    fn has_subscribers(&self) -> bool {
        self.subscribers.load(Ordering::Relaxed) > 0
    }

    fn provider_name(&self) -> &str {
        "nats"
    }
}
