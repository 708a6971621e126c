//! Product Repository Interface
//!
//! Boundary to the relational catalog store. The store is the single source
//! of truth for catalog version numbers: every successful write returns the
//! version it assigned.

use crate::entities::{Product, ProductDraft, ProductId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository: Relational Product Storage
///
/// # Example
///
/// ```ignore
/// use catalog_domain::repositories::ProductRepository;
///
/// let product = repo.upsert(ProductDraft::new(42, "Red mug", "", 9.5)).await?;
/// assert_eq!(product.version, 1);
///
/// let tombstone = repo.delete(product.id).await?;
/// assert!(repo.find_by_id(product.id).await?.is_none());
/// ```
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Read the current state of a product
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>>;

    /// Create or replace a product, returning it at its new version
    async fn upsert(&self, draft: ProductDraft) -> Result<Product>;

    /// Delete a product, returning the tombstone version
    ///
    /// Fails with `NotFound` when the product does not exist.
    async fn delete(&self, id: ProductId) -> Result<u64>;

    /// Every live product
    async fn list(&self) -> Result<Vec<Product>>;

    /// Number of live products
    async fn count(&self) -> Result<usize>;
}
