//! In-memory product repository
//!
//! Stands in for the relational catalog. Each row keeps its version
//! counter through deletes, so a re-created product continues above its
//! tombstone version.

use async_trait::async_trait;
use catalog_domain::constants::INITIAL_PRODUCT_VERSION;
use catalog_domain::entities::{Product, ProductDraft, ProductId};
use catalog_domain::error::{Error, Result};
use catalog_domain::repositories::ProductRepository;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

#[derive(Debug, Clone)]
enum Row {
    Live(Product),
    Deleted { version: u64 },
}

impl Row {
    fn version(&self) -> u64 {
        match self {
            Self::Live(product) => product.version,
            Self::Deleted { version } => *version,
        }
    }
}

/// In-memory product repository
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: DashMap<ProductId, Row>,
}

impl InMemoryProductRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.rows.get(&id).and_then(|row| match row.value() {
            Row::Live(product) => Some(product.clone()),
            Row::Deleted { .. } => None,
        }))
    }

    async fn upsert(&self, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;
        let product = match self.rows.entry(draft.id) {
            Entry::Occupied(mut occupied) => {
                let product = draft.into_product(occupied.get().version() + 1);
                occupied.insert(Row::Live(product.clone()));
                product
            }
            Entry::Vacant(vacant) => {
                let product = draft.into_product(INITIAL_PRODUCT_VERSION);
                vacant.insert(Row::Live(product.clone()));
                product
            }
        };
        debug!(product_id = %product.id, version = product.version, "product row written");
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<u64> {
        match self.rows.entry(id) {
            Entry::Occupied(mut occupied) => match occupied.get() {
                Row::Live(product) => {
                    let version = product.version + 1;
                    occupied.insert(Row::Deleted { version });
                    debug!(product_id = %id, version, "product row tombstoned");
                    Ok(version)
                }
                Row::Deleted { .. } => Err(Error::product_not_found(id)),
            },
            Entry::Vacant(_) => Err(Error::product_not_found(id)),
        }
    }

    async fn list(&self) -> Result<Vec<Product>> {
        let mut products: Vec<Product> = self
            .rows
            .iter()
            .filter_map(|row| match row.value() {
                Row::Live(product) => Some(product.clone()),
                Row::Deleted { .. } => None,
            })
            .collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self
            .rows
            .iter()
            .filter(|row| matches!(row.value(), Row::Live(_)))
            .count())
    }
}
