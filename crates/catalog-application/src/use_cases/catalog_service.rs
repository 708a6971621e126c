//! Catalog Service Use Case
//!
//! Facade over the relational catalog and the semantic index. Writes go to
//! the source of truth first and are announced on the bus afterwards; the
//! index catches up asynchronously, so no write ever waits on the
//! embedding generator.

use std::sync::Arc;

use async_trait::async_trait;
use catalog_domain::entities::{Product, ProductDraft, ProductId};
use catalog_domain::error::{Error, Result};
use catalog_domain::events::DomainEvent;
use catalog_domain::value_objects::{
    EmbeddingVector, SearchMode, SearchOptions, SearchResponse, SearchResult, SyncStatus,
    VectorRecord,
};
use tracing::{debug, info, warn};

use crate::domain_services::{
    CatalogServiceInterface, SearchEngineInterface, SyncCoordinatorInterface, SyncStats,
};
use crate::ports::{EventBusProvider, ProductRepository, VectorRecordStore};
use crate::use_cases::EmbeddingPipeline;

/// Result-size and freshness limits applied to queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// `k` used when the caller does not pass one
    pub default_k: usize,
    /// Largest `k` served; larger requests are clamped
    pub max_k: usize,
    /// Staleness bound applied when the caller does not pass one
    pub max_staleness: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_k: 10,
            max_k: 100,
            max_staleness: None,
        }
    }
}

impl SearchLimits {
    fn resolve_k(&self, k: Option<usize>) -> Result<usize> {
        match k {
            Some(0) => Err(Error::invalid_argument("k must be greater than zero")),
            Some(k) => Ok(k.min(self.max_k)),
            None => Ok(self.default_k),
        }
    }

    fn resolve_options(&self, mut options: SearchOptions) -> SearchOptions {
        if options.max_staleness.is_none() {
            options.max_staleness = self.max_staleness;
        }
        options
    }
}

/// Catalog facade implementation
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
    event_bus: Arc<dyn EventBusProvider>,
    pipeline: Arc<EmbeddingPipeline>,
    search: Arc<dyn SearchEngineInterface>,
    sync: Arc<dyn SyncCoordinatorInterface>,
    store: Arc<dyn VectorRecordStore>,
    limits: SearchLimits,
}

impl CatalogService {
    /// Create the facade with injected collaborators
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        event_bus: Arc<dyn EventBusProvider>,
        pipeline: Arc<EmbeddingPipeline>,
        search: Arc<dyn SearchEngineInterface>,
        sync: Arc<dyn SyncCoordinatorInterface>,
        store: Arc<dyn VectorRecordStore>,
        limits: SearchLimits,
    ) -> Self {
        Self {
            repository,
            event_bus,
            pipeline,
            search,
            sync,
            store,
            limits,
        }
    }

    /// Limits applied to queries
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }
}

#[async_trait]
impl CatalogServiceInterface for CatalogService {
    async fn upsert_product(&self, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;
        let product = self.repository.upsert(draft).await?;
        self.event_bus
            .publish_event(DomainEvent::ProductChanged {
                product_id: product.id,
                version: product.version,
            })
            .await?;
        info!(product_id = %product.id, version = product.version, "product saved");
        Ok(product)
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<u64> {
        let version = self.repository.delete(product_id).await?;
        self.event_bus
            .publish_event(DomainEvent::ProductDeleted {
                product_id,
                version,
            })
            .await?;
        info!(product_id = %product_id, version, "product deleted");
        Ok(version)
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product> {
        self.repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| Error::product_not_found(product_id))
    }

    async fn vector_record(&self, product_id: ProductId) -> Result<Arc<VectorRecord>> {
        self.store
            .get(product_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("vector record for product {product_id}")))
    }

    async fn semantic_search(
        &self,
        query: &str,
        k: Option<usize>,
        options: SearchOptions,
    ) -> Result<SearchResponse> {
        if query.trim().is_empty() {
            return Err(Error::invalid_argument("query must not be empty"));
        }
        let k = self.limits.resolve_k(k)?;
        let options = self.limits.resolve_options(options);

        match self.pipeline.embed(query).await {
            Ok(vector) => {
                let results = self.search.search(&vector, k, &options).await?;
                debug!(k, hits = results.len(), "semantic search served");
                Ok(SearchResponse {
                    mode: SearchMode::Semantic,
                    results,
                })
            }
            Err(e) if e.is_embedding_unavailable() => {
                warn!(error = %e, "embedding unavailable, falling back to lexical search");
                let results = self.search.lexical_search(query, k, &options).await?;
                Ok(SearchResponse {
                    mode: SearchMode::Lexical,
                    results,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn search_by_vector(
        &self,
        vector: Vec<f32>,
        k: Option<usize>,
        options: SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        let k = self.limits.resolve_k(k)?;
        let vector = EmbeddingVector::new(vector)?;
        let expected = self.pipeline.dimensions();
        if vector.dimensions() != expected {
            return Err(Error::invalid_argument(format!(
                "query vector has {} dimensions, index uses {expected}",
                vector.dimensions()
            )));
        }
        let options = self.limits.resolve_options(options);
        self.search.search(&vector, k, &options).await
    }

    async fn resync_product(&self, product_id: ProductId) -> Result<bool> {
        self.sync.resync_product(product_id).await
    }

    async fn resync_all(&self) -> Result<usize> {
        self.sync.resync_all().await
    }

    async fn sync_status(&self, product_id: ProductId) -> Result<SyncStatus> {
        self.sync
            .sync_status(product_id)
            .await?
            .ok_or_else(|| Error::product_not_found(product_id))
    }

    async fn degraded_products(&self) -> Result<Vec<SyncStatus>> {
        self.sync.degraded_products().await
    }

    fn sync_stats(&self) -> SyncStats {
        self.sync.stats()
    }
}
