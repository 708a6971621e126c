//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers. High-level
//! modules define the interfaces; providers and infrastructure implement
//! them and are injected at startup.
//!
//! ## Organization
//!
//! - **infrastructure/** - Message bus
//! - **providers/** - Embedding generator and vector record store

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{DomainEventStream, EventBusProvider};
pub use providers::{EmbeddingProvider, VectorRecordStore};
