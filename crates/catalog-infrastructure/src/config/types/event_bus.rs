//! Event bus configuration types

use crate::constants::{DEFAULT_EVENT_BUS_CAPACITY, DEFAULT_NATS_SUBJECT};
use serde::{Deserialize, Serialize};

/// Event bus implementations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventBusKind {
    /// In-process broadcast channel (Tokio)
    #[default]
    Tokio,
    /// NATS subject, for catalogs written by other processes
    Nats,
    /// Drops every event; the index only changes through re-sync
    Null,
}

/// Event bus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Event bus to use
    pub provider: EventBusKind,

    /// Events buffered per subscriber by the in-process bus; a subscriber
    /// that falls further behind observes a lag and triggers a full re-sync
    pub capacity: usize,

    /// NATS server URL (e.g. "nats://localhost:4222")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nats_url: Option<String>,

    /// NATS subject carrying catalog events
    pub subject: String,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            provider: EventBusKind::Tokio,
            capacity: DEFAULT_EVENT_BUS_CAPACITY,
            nats_url: None,
            subject: DEFAULT_NATS_SUBJECT.to_string(),
        }
    }
}

impl EventBusConfig {
    /// In-process bus with a custom capacity
    pub fn tokio_with_capacity(capacity: usize) -> Self {
        Self {
            provider: EventBusKind::Tokio,
            capacity,
            ..Default::default()
        }
    }

    /// NATS bus at `url`
    pub fn nats(url: impl Into<String>) -> Self {
        Self {
            provider: EventBusKind::Nats,
            nats_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// No-op bus
    pub fn null() -> Self {
        Self {
            provider: EventBusKind::Null,
            ..Default::default()
        }
    }
}
