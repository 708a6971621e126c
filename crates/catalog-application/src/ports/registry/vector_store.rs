//! Vector Record Store Registry

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::VectorRecordStore;

/// Settings handed to a vector record store factory
#[derive(Debug, Clone, Default)]
pub struct VectorStoreProviderConfig {
    /// Provider name (e.g., "memory")
    pub provider: String,
    /// Expected embedding dimension; records of another dimension are rejected
    pub dimensions: Option<usize>,
    /// Provider-specific settings
    pub extra: HashMap<String, String>,
}

impl VectorStoreProviderConfig {
    /// Config for the named provider
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the expected dimension
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Add a provider-specific setting
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for one vector record store implementation
pub struct VectorStoreProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory building a store from configuration
    pub factory: fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorRecordStore>, String>,
}

#[linkme::distributed_slice]
pub static VECTOR_STORE_PROVIDERS: [VectorStoreProviderEntry] = [..];

/// Build the vector record store named in `config`
pub fn resolve_vector_store_provider(
    config: &VectorStoreProviderConfig,
) -> Result<Arc<dyn VectorRecordStore>, String> {
    if let Some(entry) = VECTOR_STORE_PROVIDERS
        .iter()
        .find(|entry| entry.name == config.provider)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = VECTOR_STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown vector store provider '{}'. Available providers: {available:?}",
        config.provider
    ))
}

/// (name, description) of every registered vector record store
pub fn list_vector_store_providers() -> Vec<(&'static str, &'static str)> {
    VECTOR_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
