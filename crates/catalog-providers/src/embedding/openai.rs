//! OpenAI Embedding Provider
//!
//! Uses the `/embeddings` endpoint, which accepts a whole batch per
//! request and returns items tagged with their input index.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};
use catalog_domain::error::{Error, Result};
use catalog_domain::ports::EmbeddingProvider;
use reqwest::Client;

use crate::constants::{
    CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OPENAI_ADA, EMBEDDING_DIMENSION_OPENAI_LARGE,
    EMBEDDING_DIMENSION_OPENAI_SMALL, OPENAI_DEFAULT_MODEL, OPENAI_DEFAULT_URL,
};
use crate::embedding::helpers::constructor;
use crate::utils::HttpResponseUtils;

/// OpenAI embedding provider
pub struct OpenAIEmbeddingProvider {
    api_key: String,
    base_url: String,
    model: String,
    dimensions: Option<usize>,
    timeout: Duration,
    http_client: Client,
}

impl OpenAIEmbeddingProvider {
    /// Create a provider
    ///
    /// `dimensions` is forwarded to models that support shortened output.
    pub fn new(
        api_key: &str,
        base_url: Option<&str>,
        model: String,
        dimensions: Option<usize>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            api_key: constructor::validate_api_key(api_key),
            base_url: constructor::effective_url(base_url, OPENAI_DEFAULT_URL),
            model,
            dimensions,
            timeout,
            http_client,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_embeddings(&self, texts: &[String]) -> Result<serde_json::Value> {
        let mut payload = serde_json::json!({
            "input": texts,
            "model": self.model,
            "encoding_format": "float"
        });
        if let Some(dimensions) = self.dimensions {
            payload["dimensions"] = serde_json::json!(dimensions);
        }

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| HttpResponseUtils::request_error("OpenAI", self.timeout, &e))?;

        HttpResponseUtils::check_and_parse(response, "OpenAI").await
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = self.fetch_embeddings(texts).await?;
        let data = body["data"].as_array().ok_or_else(|| {
            Error::embedding_unavailable("OpenAI invalid response format: missing data array")
        })?;
        if data.len() != texts.len() {
            return Err(Error::embedding_unavailable(format!(
                "OpenAI returned {} embeddings for {} inputs",
                data.len(),
                texts.len()
            )));
        }

        let mut vectors = vec![Vec::new(); texts.len()];
        for (position, item) in data.iter().enumerate() {
            let index = item["index"]
                .as_u64()
                .and_then(|index| usize::try_from(index).ok())
                .unwrap_or(position);
            let slot = vectors.get_mut(index).ok_or_else(|| {
                Error::embedding_unavailable(format!("OpenAI returned out-of-range index {index}"))
            })?;
            *slot = HttpResponseUtils::parse_vector(&item["embedding"], "OpenAI")?;
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions.unwrap_or(match self.model.as_str() {
            "text-embedding-3-large" => EMBEDDING_DIMENSION_OPENAI_LARGE,
            "text-embedding-ada-002" => EMBEDDING_DIMENSION_OPENAI_ADA,
            _ => EMBEDDING_DIMENSION_OPENAI_SMALL,
        })
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn openai_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| "OpenAI provider requires an API key".to_string())?;
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string());
    let timeout = constructor::effective_timeout(config.timeout);
    let http_client = constructor::http_client(timeout)?;

    Ok(Arc::new(OpenAIEmbeddingProvider::new(
        api_key,
        config.base_url.as_deref(),
        model,
        config.dimensions,
        timeout,
        http_client,
    )))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static OPENAI_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "openai",
    description: "OpenAI embedding provider (text-embedding-3-small/large, ada-002)",
    factory: openai_factory,
};
