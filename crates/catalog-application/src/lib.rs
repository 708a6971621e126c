//! Application Layer - Catalog Semantic Index
//!
//! Use cases that keep product embeddings consistent with the relational
//! catalog and serve similarity search over them.
//!
//! ## Architecture
//!
//! The application layer:
//! - Implements the embedding pipeline, similarity search engine,
//!   synchronization coordinator and catalog facade
//! - Declares service interfaces in [`domain_services`]
//! - Owns the provider registries that concrete providers plug into
//! - Has no dependencies on infrastructure or concrete providers
//!
//! ## Data Flow
//!
//! ```text
//! upsert/delete ─▶ ProductRepository ─▶ EventBus ─▶ SyncCoordinator
//!                                                     │
//!                                   EmbeddingPipeline ◀┘
//!                                           │
//!                                   VectorRecordStore ─▶ SimilaritySearchEngine
//! ```

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
