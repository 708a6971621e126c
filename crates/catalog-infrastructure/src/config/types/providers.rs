//! Provider configuration types
//!
//! Provider names are looked up in the registries at startup, so any
//! provider linked into the binary can be selected here.

use std::time::Duration;

use catalog_application::ports::registry::{EmbeddingProviderConfig, VectorStoreProviderConfig};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EMBEDDING_PROVIDER, DEFAULT_VECTOR_STORE_PROVIDER};

/// Embedding generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider name ("null", "ollama", "openai")
    pub provider: String,
    /// Model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Base URL of the generator API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key for hosted generators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Embedding dimension; defaults to the provider's own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: None,
            base_url: None,
            api_key: None,
            dimensions: None,
        }
    }
}

impl EmbeddingConfig {
    /// Registry settings for this provider with the given request timeout
    pub fn to_registry_config(&self, timeout: Duration) -> EmbeddingProviderConfig {
        let mut config = EmbeddingProviderConfig::new(&self.provider).with_timeout(timeout);
        config.model.clone_from(&self.model);
        config.base_url.clone_from(&self.base_url);
        config.api_key.clone_from(&self.api_key);
        config.dimensions = self.dimensions;
        config
    }
}

/// Vector record store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    /// Provider name ("memory")
    pub provider: String,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_VECTOR_STORE_PROVIDER.to_string(),
        }
    }
}

impl VectorStoreConfig {
    /// Registry settings for this store, pinned to `dimensions`
    pub fn to_registry_config(&self, dimensions: usize) -> VectorStoreProviderConfig {
        VectorStoreProviderConfig::new(&self.provider).with_dimensions(dimensions)
    }
}

/// Provider configurations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,
    /// Vector record store configuration
    pub vector_store: VectorStoreConfig,
}
