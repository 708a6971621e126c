use std::sync::Arc;

use async_trait::async_trait;
use catalog_domain::entities::{Product, ProductDraft, ProductId};
use catalog_domain::error::Result;
use catalog_domain::value_objects::{
    SearchOptions, SearchResponse, SearchResult, SyncStatus, VectorRecord,
};

use super::sync::SyncStats;

/// Catalog Facade Interface
///
/// The single entry point callers use: relational writes that emit change
/// events, and queries over the semantic index. Writes never wait for
/// embeddings.
#[async_trait]
pub trait CatalogServiceInterface: Send + Sync {
    /// Create or replace a product and announce the change
    async fn upsert_product(&self, draft: ProductDraft) -> Result<Product>;

    /// Delete a product and announce the tombstone; returns its version
    async fn delete_product(&self, product_id: ProductId) -> Result<u64>;

    /// Current relational state of a product
    async fn get_product(&self, product_id: ProductId) -> Result<Product>;

    /// Stored vector record of a product
    async fn vector_record(&self, product_id: ProductId) -> Result<Arc<VectorRecord>>;

    /// Answer a free-text query, semantically when possible
    ///
    /// `k = None` uses the configured default; larger values are clamped to
    /// the configured maximum.
    async fn semantic_search(
        &self,
        query: &str,
        k: Option<usize>,
        options: SearchOptions,
    ) -> Result<SearchResponse>;

    /// Rank records against a caller-supplied vector
    async fn search_by_vector(
        &self,
        vector: Vec<f32>,
        k: Option<usize>,
        options: SearchOptions,
    ) -> Result<Vec<SearchResult>>;

    /// Recompute one product's vector
    async fn resync_product(&self, product_id: ProductId) -> Result<bool>;

    /// Reconcile the whole index with the catalog
    async fn resync_all(&self) -> Result<usize>;

    /// Synchronization status of one product
    async fn sync_status(&self, product_id: ProductId) -> Result<SyncStatus>;

    /// Products whose vectors could not be refreshed
    async fn degraded_products(&self) -> Result<Vec<SyncStatus>>;

    /// Synchronization counters
    fn sync_stats(&self) -> SyncStats;
}
