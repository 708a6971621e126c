//! Event Bus Provider Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | NullEventBusProvider | Testing | Discards events, never yields any |
//! | TokioEventBusProvider | In-Process | Tokio broadcast channel |
//! | NatsEventBusProvider | Distributed | NATS subject, JSON payloads |
//!
//! - **Testing**: `NullEventBusProvider`
//! - **Single instance**: `TokioEventBusProvider`
//! - **Several processes**: `NatsEventBusProvider` (feature `events-nats`)

#[cfg(feature = "events-nats")]
pub mod nats;
pub mod null;
pub mod tokio;

#[cfg(feature = "events-nats")]
pub use self::nats::NatsEventBusProvider;
pub use self::null::NullEventBusProvider;
pub use self::tokio::TokioEventBusProvider;

pub use catalog_domain::events::DomainEvent;
pub use catalog_domain::ports::{DomainEventStream, EventBusProvider};
