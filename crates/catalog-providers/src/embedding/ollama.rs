//! Ollama Embedding Provider
//!
//! Uses Ollama's local `/api/embeddings` endpoint. The API embeds one
//! prompt per request, so batches are sent sequentially.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};
use catalog_domain::error::{Error, Result};
use catalog_domain::ports::EmbeddingProvider;
use reqwest::Client;
use tracing::debug;

use crate::constants::{
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OLLAMA_DEFAULT, EMBEDDING_DIMENSION_OLLAMA_MINILM,
    EMBEDDING_DIMENSION_OLLAMA_MXBAI, EMBEDDING_DIMENSION_OLLAMA_NOMIC, OLLAMA_DEFAULT_MODEL,
    OLLAMA_DEFAULT_URL,
};
use crate::embedding::helpers::constructor;
use crate::utils::HttpResponseUtils;

/// Ollama embedding provider
///
/// ## Example
///
/// ```rust,no_run
/// use catalog_providers::embedding::OllamaEmbeddingProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let provider = OllamaEmbeddingProvider::new(
///     "http://localhost:11434".to_string(),
///     "all-minilm".to_string(),
///     None,
///     Duration::from_secs(30),
///     Client::new(),
/// );
/// ```
pub struct OllamaEmbeddingProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
    http_client: Client,
}

impl OllamaEmbeddingProvider {
    /// Create a provider
    ///
    /// `dimensions` overrides the dimension known for `model`.
    pub fn new(
        base_url: String,
        model: String,
        dimensions: Option<usize>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        let dimensions = dimensions.unwrap_or_else(|| known_dimensions(&model));
        Self {
            base_url: constructor::effective_url(Some(&base_url), OLLAMA_DEFAULT_URL),
            model,
            dimensions,
            timeout,
            http_client,
        }
    }

    async fn fetch_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let payload = serde_json::json!({
            "model": self.model,
            "prompt": text,
            "stream": false
        });

        let response = self
            .http_client
            .post(format!("{}/api/embeddings", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::request_error("Ollama", self.timeout, &e))?;

        let body = HttpResponseUtils::check_and_parse(response, "Ollama").await?;
        HttpResponseUtils::parse_vector(&body["embedding"], "Ollama")
    }
}

fn known_dimensions(model: &str) -> usize {
    match model {
        "all-minilm" => EMBEDDING_DIMENSION_OLLAMA_MINILM,
        "nomic-embed-text" => EMBEDDING_DIMENSION_OLLAMA_NOMIC,
        "mxbai-embed-large" => EMBEDDING_DIMENSION_OLLAMA_MXBAI,
        _ => EMBEDDING_DIMENSION_OLLAMA_DEFAULT,
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.fetch_embedding(text).await?);
        }
        debug!(model = %self.model, texts = texts.len(), "ollama embeddings fetched");
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::request_error("Ollama", self.timeout, &e))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::embedding_unavailable(format!(
                "Ollama health check returned {}",
                response.status()
            )))
        }
    }
}

fn ollama_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let base_url = constructor::effective_url(config.base_url.as_deref(), OLLAMA_DEFAULT_URL);
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OLLAMA_DEFAULT_MODEL.to_string());
    let timeout = constructor::effective_timeout(config.timeout);
    let http_client = constructor::http_client(timeout)?;

    Ok(Arc::new(OllamaEmbeddingProvider::new(
        base_url,
        model,
        config.dimensions,
        timeout,
        http_client,
    )))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OLLAMA_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "ollama",
    description: "Ollama local embedding provider (all-minilm, nomic-embed-text, ...)",
    factory: ollama_factory,
};
