//! Application bootstrap
//!
//! ```text
//! AppConfig ─▶ registries ─▶ EmbeddingProvider ─▶ EmbeddingPipeline ─┐
//!          ├─▶ registries ─▶ VectorRecordStore ──────────────────────┤
//!          └─▶ EventBusConfig ─▶ EventBusProvider ────────────────────┤
//!                                                                      ▼
//!                          SyncCoordinator + SimilaritySearchEngine + CatalogService
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(AppConfig::default()).await?;
//! let sync = context.start_sync().await?;
//!
//! let catalog = context.catalog();
//! catalog.upsert_product(ProductDraft::new(42, "Blue mug", "Ceramic", 9.5)).await?;
//!
//! sync.shutdown().await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use catalog_application::domain_services::{
    CatalogServiceInterface, CatalogVersionView, SearchEngineInterface, SyncCoordinatorInterface,
};
use catalog_application::ports::{EventBusProvider, ProductRepository, VectorRecordStore};
use catalog_application::use_cases::{
    CatalogService, EmbeddingPipeline, SimilaritySearchEngine, SyncCoordinator, SyncHandle,
};
use catalog_domain::error::Result;
use catalog_providers::repository::InMemoryProductRepository;
use tracing::info;

use super::provider_resolvers::{create_event_bus, resolve_embedding, resolve_vector_store};
use crate::config::AppConfig;

/// Wired application
///
/// Holds every long-lived component; the sync coordinator is created here
/// but only runs once [`AppContext::start_sync`] is called.
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    repository: Arc<dyn ProductRepository>,
    store: Arc<dyn VectorRecordStore>,
    event_bus: Arc<dyn EventBusProvider>,
    pipeline: Arc<EmbeddingPipeline>,
    coordinator: Arc<SyncCoordinator>,
    search: Arc<dyn SearchEngineInterface>,
    catalog: Arc<dyn CatalogServiceInterface>,
}

impl AppContext {
    /// Catalog facade
    pub fn catalog(&self) -> Arc<dyn CatalogServiceInterface> {
        Arc::clone(&self.catalog)
    }

    /// Relational catalog
    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        Arc::clone(&self.repository)
    }

    /// Vector record store
    pub fn vector_store(&self) -> Arc<dyn VectorRecordStore> {
        Arc::clone(&self.store)
    }

    /// Event bus
    pub fn event_bus(&self) -> Arc<dyn EventBusProvider> {
        Arc::clone(&self.event_bus)
    }

    /// Embedding pipeline
    pub fn pipeline(&self) -> Arc<EmbeddingPipeline> {
        Arc::clone(&self.pipeline)
    }

    /// Similarity search engine
    pub fn search(&self) -> Arc<dyn SearchEngineInterface> {
        Arc::clone(&self.search)
    }

    /// Synchronization coordinator
    pub fn sync(&self) -> Arc<dyn SyncCoordinatorInterface> {
        Arc::clone(&self.coordinator) as Arc<dyn SyncCoordinatorInterface>
    }

    /// Subscribe the coordinator to the bus and start its workers
    pub async fn start_sync(&self) -> Result<SyncHandle> {
        self.coordinator.start().await
    }

    /// Wait until the coordinator has no pending work, up to `timeout`
    pub async fn wait_for_sync(&self, timeout: Duration) -> bool {
        self.coordinator.wait_until_idle(timeout).await
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("embedding", &self.pipeline.provider_name())
            .field("vector_store", &self.store.provider_name())
            .field("event_bus", &self.event_bus.provider_name())
            .finish_non_exhaustive()
    }
}

/// Build the application from configuration
///
/// Providers self-register through linkme when `catalog-providers` is
/// linked; no explicit registration call is needed.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    info!("initializing catalog semantic index");
    let config = Arc::new(config);

    let embedding = resolve_embedding(&config)?;
    let pipeline = Arc::new(EmbeddingPipeline::new(
        embedding,
        config
            .sync
            .pipeline_config(config.providers.embedding.dimensions),
    ));
    let store = resolve_vector_store(&config, pipeline.dimensions())?;
    let event_bus = create_event_bus(&config.event_bus).await?;
    let repository: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());

    info!(
        embedding = pipeline.provider_name(),
        dimensions = pipeline.dimensions(),
        vector_store = store.provider_name(),
        event_bus = event_bus.provider_name(),
        "resolved providers"
    );

    let coordinator = Arc::new(SyncCoordinator::new(
        Arc::clone(&repository),
        Arc::clone(&pipeline),
        Arc::clone(&store),
        Arc::clone(&event_bus),
        config.sync.coordinator_config(),
    ));
    let versions: Arc<dyn CatalogVersionView> = coordinator.clone();
    let search: Arc<dyn SearchEngineInterface> =
        Arc::new(SimilaritySearchEngine::new(Arc::clone(&store)).with_version_view(versions));
    let catalog: Arc<dyn CatalogServiceInterface> = Arc::new(CatalogService::new(
        Arc::clone(&repository),
        Arc::clone(&event_bus),
        Arc::clone(&pipeline),
        Arc::clone(&search),
        coordinator.clone(),
        Arc::clone(&store),
        config.search.limits(),
    ));

    Ok(AppContext {
        config,
        repository,
        store,
        event_bus,
        pipeline,
        coordinator,
        search,
        catalog,
    })
}

/// Application with default configuration: offline embeddings, in-memory
/// stores and the in-process bus
pub async fn init_test_app() -> Result<AppContext> {
    init_app(AppConfig::default()).await
}
