//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity of their own.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`EmbeddingVector`] | Immutable fixed-dimension embedding |
//! | [`VectorRecord`] | Embedding of one product plus version metadata |
//! | [`SearchResult`] | Ranked hit from a similarity query |
//! | [`ProductFilter`] | Pre-ranking eligibility predicate |
//! | [`SyncTask`] | Pending re-embedding work for one product |
//! | [`SyncStatus`] | Observable synchronization state of one product |

/// Semantic embedding value objects
pub mod embedding;
/// Search-related value objects
pub mod search;
/// Synchronization value objects
pub mod sync;
/// Vector record value objects
pub mod vector_record;

pub use embedding::EmbeddingVector;
pub use search::{ProductFilter, SearchMode, SearchOptions, SearchResponse, SearchResult};
pub use sync::{SyncState, SyncStatus, SyncTask};
pub use vector_record::{ProductSnapshot, PutOutcome, VectorRecord};
