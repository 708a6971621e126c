//! # Catalog Semantic Index - Provider Implementations
//!
//! Concrete implementations of the ports declared in `catalog-domain`.
//! Embedding generators and vector record stores register themselves in the
//! `catalog-application` registries, so selecting one is a configuration
//! change.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | Ollama, OpenAI, Null (token hashing) |
//! | Vector store | `VectorRecordStore` | InMemory |
//! | Repository | `ProductRepository` | InMemory |
//! | Events | `EventBusProvider` | Tokio, Null, Nats |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! catalog-providers = { version = "0.1", default-features = false, features = ["embedding-ollama", "vectorstore-memory"] }
//! ```

pub use catalog_domain::error::{Error, Result};
pub use catalog_domain::ports::{EmbeddingProvider, EventBusProvider, VectorRecordStore};
pub use catalog_domain::repositories::ProductRepository;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Embedding generator implementations
pub mod embedding;

/// Vector record store implementations
pub mod vector_store;

/// Event bus implementations
pub mod events;

/// Product repository implementations
pub mod repository;
