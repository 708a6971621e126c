//! # Catalog Domain
//!
//! Core types and boundary contracts for the catalog semantic index.
//!
//! The domain layer has no knowledge of transports, configuration or
//! concrete providers. It defines what a product, an embedding and a vector
//! record are, which events flow between components, and the ports that
//! the outer layers implement.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`entities`] | `Product` and its write model |
//! | [`value_objects`] | Embeddings, vector records, search results, sync tasks |
//! | [`events`] | Catalog change and sync notification events |
//! | [`ports`] | Provider and infrastructure interfaces |
//! | [`repositories`] | Relational source-of-truth contract |
//! | [`error`] | Domain error taxonomy |

pub mod constants;
pub mod entities;
pub mod error;
pub mod events;
pub mod ports;
pub mod repositories;
pub mod value_objects;

pub use entities::{Product, ProductDraft, ProductId};
pub use error::{Error, Result};
pub use events::DomainEvent;
pub use value_objects::{
    EmbeddingVector, ProductFilter, ProductSnapshot, PutOutcome, SearchMode, SearchOptions,
    SearchResponse, SearchResult, SyncState, SyncStatus, SyncTask, VectorRecord,
};
