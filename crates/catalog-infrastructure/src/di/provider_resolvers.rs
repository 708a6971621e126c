//! Provider resolution from configuration
//!
//! ```text
//! AppConfig → registry config → linkme registry → Arc<dyn Provider>
//! ```

use std::sync::Arc;

use catalog_application::ports::registry::{
    resolve_embedding_provider, resolve_vector_store_provider,
};
use catalog_application::ports::{EmbeddingProvider, EventBusProvider, VectorRecordStore};
use catalog_domain::error::{Error, Result};
use catalog_providers::events::{NullEventBusProvider, TokioEventBusProvider};
use tracing::info;

use crate::config::{AppConfig, EventBusConfig, EventBusKind};

/// Build the configured embedding provider
pub fn resolve_embedding(config: &AppConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    let registry_config = config
        .providers
        .embedding
        .to_registry_config(config.sync.embedding_timeout());
    resolve_embedding_provider(&registry_config)
        .map_err(|e| Error::configuration(format!("Embedding: {e}")))
}

/// Build the configured vector record store for vectors of `dimensions`
pub fn resolve_vector_store(
    config: &AppConfig,
    dimensions: usize,
) -> Result<Arc<dyn VectorRecordStore>> {
    let registry_config = config
        .providers
        .vector_store
        .to_registry_config(dimensions);
    resolve_vector_store_provider(&registry_config)
        .map_err(|e| Error::configuration(format!("VectorStore: {e}")))
}

/// Build the configured event bus
///
/// The NATS bus needs the `events-nats` feature and connects eagerly.
pub async fn create_event_bus(config: &EventBusConfig) -> Result<Arc<dyn EventBusProvider>> {
    let bus: Arc<dyn EventBusProvider> = match config.provider {
        EventBusKind::Tokio => Arc::new(TokioEventBusProvider::with_capacity(config.capacity)),
        EventBusKind::Null => Arc::new(NullEventBusProvider::new()),
        EventBusKind::Nats => create_nats_event_bus(config).await?,
    };
    info!(provider = bus.provider_name(), "event bus ready");
    Ok(bus)
}

#[cfg(feature = "events-nats")]
async fn create_nats_event_bus(config: &EventBusConfig) -> Result<Arc<dyn EventBusProvider>> {
    use catalog_providers::events::NatsEventBusProvider;

    let url = config
        .nats_url
        .as_deref()
        .unwrap_or(crate::constants::DEFAULT_NATS_URL);
    let bus = NatsEventBusProvider::with_subject(url, &config.subject).await?;
    Ok(Arc::new(bus))
}

#[cfg(not(feature = "events-nats"))]
#[allow(clippy::unused_async)]
async fn create_nats_event_bus(_config: &EventBusConfig) -> Result<Arc<dyn EventBusProvider>> {
    Err(Error::configuration(
        "NATS event bus requested but the `events-nats` feature is disabled",
    ))
}
