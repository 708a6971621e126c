use crate::error::{Error, Result};
use async_trait::async_trait;

/// Embedding Generator Capability
///
/// Turns text into a fixed-dimension vector of floats. Implementations are
/// swappable at startup (local Ollama, hosted APIs, an offline hashing
/// generator for tests). Output is returned raw: dimension and finiteness
/// checks, normalization and timeouts belong to the embedding pipeline,
/// which must not trust the generator.
///
/// # Default Implementations
///
/// `embed()` delegates to `embed_batch()` with a single item. Providers
/// only need to implement `embed_batch()`.
///
/// # Example
///
/// ```ignore
/// use catalog_domain::ports::providers::EmbeddingProvider;
///
/// let vector = provider.embed("Blue ceramic mug").await?;
/// assert_eq!(vector.len(), provider.dimensions());
///
/// let texts = vec!["Red mug".to_string(), "Blue mug".to_string()];
/// let vectors = provider.embed_batch(&texts).await?;
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text (default implementation provided)
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding_unavailable("no embedding returned"))
    }

    /// Embed several texts, returning vectors in matching order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Dimensionality of produced vectors
    fn dimensions(&self) -> usize;

    /// Provider identifier (e.g., "ollama", "openai", "null")
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model(&self) -> &str;

    /// Health check for the provider (default implementation provided)
    async fn health_check(&self) -> Result<()> {
        self.embed("health check").await?;
        Ok(())
    }
}
