//! Application Ports
//!
//! Domain ports are re-exported so callers can depend on the application
//! crate alone. The provider registries live here because the application
//! layer decides which providers exist; the providers crate fills them.

/// Provider auto-registration
pub mod registry;

pub use catalog_domain::ports::{
    DomainEventStream, EmbeddingProvider, EventBusProvider, VectorRecordStore,
};
pub use catalog_domain::repositories::ProductRepository;
