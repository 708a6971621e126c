//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`EmbeddingPipeline`] | Validated, normalized embeddings from an untrusted generator |
//! | [`SimilaritySearchEngine`] | Exact top-k cosine ranking over a store snapshot |
//! | [`SyncCoordinator`] | Event-driven, deduplicated re-embedding with retries |
//! | [`CatalogService`] | Catalog writes plus semantic queries |

pub mod catalog_service;
pub mod embedding_pipeline;
pub mod similarity_search;
pub mod sync;

pub use catalog_service::{CatalogService, SearchLimits};
pub use embedding_pipeline::{EmbeddingPipeline, EmbeddingPipelineConfig};
pub use similarity_search::SimilaritySearchEngine;
pub use sync::{RetryPolicy, SyncCoordinator, SyncCoordinatorConfig, SyncHandle};
