//! Embedding Provider Implementations
//!
//! | Provider | Type | Notes |
//! |----------|------|-------|
//! | NullEmbeddingProvider | Offline | Deterministic token hashing, for tests and air-gapped runs |
//! | OllamaEmbeddingProvider | Local | `/api/embeddings`, one request per text |
//! | OpenAIEmbeddingProvider | Cloud | `/embeddings`, batched |

pub mod helpers;
pub mod null;
#[cfg(feature = "embedding-ollama")]
pub mod ollama;
#[cfg(feature = "embedding-openai")]
pub mod openai;

pub use null::NullEmbeddingProvider;
#[cfg(feature = "embedding-ollama")]
pub use ollama::OllamaEmbeddingProvider;
#[cfg(feature = "embedding-openai")]
pub use openai::OpenAIEmbeddingProvider;
