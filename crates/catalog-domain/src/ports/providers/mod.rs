//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | EmbeddingProvider | Text embedding generation services |
//! | VectorRecordStore | Versioned per-product embedding storage |

/// Embedding provider port
pub mod embedding;
/// Vector record store port
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use vector_store::VectorRecordStore;
