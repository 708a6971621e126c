//! Embedding Pipeline Use Case
//!
//! Wraps an [`EmbeddingProvider`] with the checks the rest of the system
//! relies on: bounded latency, matching batch cardinality, the configured
//! dimension, finite components and unit length. Every generator failure
//! surfaces as `EmbeddingUnavailable` so callers can treat it as transient.

use std::sync::Arc;
use std::time::Duration;

use catalog_domain::entities::Product;
use catalog_domain::error::{Error, Result};
use catalog_domain::value_objects::EmbeddingVector;
use tracing::{debug, warn};

use crate::ports::EmbeddingProvider;

/// Pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddingPipelineConfig {
    /// Expected dimension; `None` trusts the provider's declared dimension
    pub dimensions: Option<usize>,
    /// Upper bound for a single generator call
    pub timeout: Duration,
    /// Texts sent per generator call
    pub batch_size: usize,
}

impl Default for EmbeddingPipelineConfig {
    fn default() -> Self {
        Self {
            dimensions: None,
            timeout: Duration::from_secs(10),
            batch_size: 32,
        }
    }
}

/// Validated embedding generation
pub struct EmbeddingPipeline {
    provider: Arc<dyn EmbeddingProvider>,
    config: EmbeddingPipelineConfig,
}

impl EmbeddingPipeline {
    /// Create a pipeline over `provider`
    pub fn new(provider: Arc<dyn EmbeddingProvider>, config: EmbeddingPipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Dimension every produced vector has
    pub fn dimensions(&self) -> usize {
        self.config
            .dimensions
            .unwrap_or_else(|| self.provider.dimensions())
    }

    /// Name of the underlying generator
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Embed one text
    pub async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| Error::embedding_unavailable("generator returned no embedding"))
    }

    /// Embed the text of a product at its current version
    pub async fn embed_product(&self, product: &Product) -> Result<EmbeddingVector> {
        self.embed(&product.embedding_text()).await
    }

    /// Embed several texts, preserving order
    ///
    /// One malformed vector fails the whole batch.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<EmbeddingVector>> {
        if let Some(position) = texts.iter().position(|t| t.trim().is_empty()) {
            return Err(Error::invalid_argument(format!(
                "text {position} of the batch is empty"
            )));
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size.max(1)) {
            let raw = self.call_provider(chunk).await?;
            if raw.len() != chunk.len() {
                return Err(Error::embedding_unavailable(format!(
                    "generator returned {} embeddings for {} texts",
                    raw.len(),
                    chunk.len()
                )));
            }
            for components in raw {
                vectors.push(self.validate(components)?);
            }
        }
        Ok(vectors)
    }

    async fn call_provider(&self, chunk: &[String]) -> Result<Vec<Vec<f32>>> {
        let provider = self.provider.provider_name();
        match tokio::time::timeout(self.config.timeout, self.provider.embed_batch(chunk)).await {
            Ok(Ok(raw)) => {
                debug!(provider, texts = chunk.len(), "embedding batch generated");
                Ok(raw)
            }
            Ok(Err(e)) if e.is_embedding_unavailable() => {
                warn!(provider, error = %e, "embedding generator failed");
                Err(e)
            }
            Ok(Err(e)) => {
                warn!(provider, error = %e, "embedding generator failed");
                Err(Error::embedding_unavailable(format!("{provider}: {e}")))
            }
            Err(_) => {
                warn!(provider, timeout_ms = self.config.timeout.as_millis(), "embedding call timed out");
                Err(Error::embedding_unavailable(format!(
                    "{provider} did not answer within {:?}",
                    self.config.timeout
                )))
            }
        }
    }

    fn validate(&self, components: Vec<f32>) -> Result<EmbeddingVector> {
        let expected = self.dimensions();
        if components.len() != expected {
            return Err(Error::embedding_unavailable(format!(
                "expected {expected} dimensions, generator returned {}",
                components.len()
            )));
        }
        EmbeddingVector::normalized(components)
            .map_err(|e| Error::embedding_unavailable(format!("malformed embedding: {e}")))
    }
}
