//! Provider Registry System
//!
//! Compile-time registration of provider factories with `linkme`.
//!
//! ```text
//! catalog-providers                     catalog-application
//! ─────────────────                     ───────────────────
//! #[distributed_slice(EMBEDDING_PROVIDERS)]
//! static OLLAMA: EmbeddingProviderEntry ──▶ EMBEDDING_PROVIDERS.iter()
//!                                              │
//!                         config "ollama" ─────┴──▶ resolve_embedding_provider
//! ```
//!
//! ## Registering a Provider
//!
//! ```ignore
//! use catalog_application::ports::registry::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};
//!
//! #[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
//! static OLLAMA_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
//!     name: "ollama",
//!     description: "Ollama local embedding provider",
//!     factory: ollama_factory,
//! };
//! ```

pub mod embedding;
pub mod vector_store;

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry, list_embedding_providers,
    resolve_embedding_provider,
};
pub use vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
    list_vector_store_providers, resolve_vector_store_provider,
};
