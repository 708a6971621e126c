use crate::entities::ProductId;
use crate::error::Result;
use crate::value_objects::{PutOutcome, VectorRecord};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Versioned Vector Record Storage
///
/// Keyed container mapping a product to its current embedding.
///
/// ## Contract
///
/// - Every operation is atomic with respect to a single product
/// - `put` is version-gated: a record whose `source_version` is not newer
///   than the stored one is discarded and reported as
///   [`PutOutcome::Discarded`]
/// - `scan` returns a point-in-time snapshot that stays valid while
///   writers proceed; readers never block writers on unrelated keys
///
/// # Example
///
/// ```ignore
/// use catalog_domain::ports::providers::VectorRecordStore;
///
/// let outcome = store.put(record).await?;
/// if outcome.is_applied() {
///     let current = store.get(product_id).await?;
/// }
///
/// for record in store.scan().await? {
///     println!("{} @ v{}", record.product_id, record.source_version);
/// }
/// ```
#[async_trait]
pub trait VectorRecordStore: Send + Sync {
    /// Insert or replace the record for its product, gated by version
    async fn put(&self, record: VectorRecord) -> Result<PutOutcome>;

    /// Current record for a product
    async fn get(&self, product_id: ProductId) -> Result<Option<Arc<VectorRecord>>>;

    /// Remove the record for a product, returning it if present
    async fn remove(&self, product_id: ProductId) -> Result<Option<Arc<VectorRecord>>>;

    /// Remove the record only if its `source_version` is at most `version`
    ///
    /// Applying a delete must not erase a record computed for a later
    /// recreation of the same product.
    async fn remove_up_to(
        &self,
        product_id: ProductId,
        version: u64,
    ) -> Result<Option<Arc<VectorRecord>>>;

    /// Point-in-time snapshot of every record
    async fn scan(&self) -> Result<Vec<Arc<VectorRecord>>>;

    /// Number of stored records
    async fn len(&self) -> Result<usize>;

    /// Whether the store holds no records
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Provider statistics (record count, dimensions, provider name)
    async fn stats(&self) -> Result<HashMap<String, Value>>;

    /// Provider identifier (e.g., "memory")
    fn provider_name(&self) -> &str;
}
