//! In-memory vector record store
//!
//! Records live in a sharded concurrent map. Each record is an immutable
//! `Arc<VectorRecord>`: writers swap whole records under the key's shard
//! lock and readers clone `Arc`s, so a scan never observes a half-written
//! vector and never holds a lock while the caller ranks results.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use catalog_domain::entities::ProductId;
use catalog_domain::error::{Error, Result};
use catalog_domain::ports::VectorRecordStore;
use catalog_domain::value_objects::{PutOutcome, VectorRecord};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;

/// In-memory vector record store
#[derive(Debug, Default)]
pub struct InMemoryVectorRecordStore {
    records: DashMap<ProductId, Arc<VectorRecord>>,
    dimensions: Option<usize>,
}

impl InMemoryVectorRecordStore {
    /// Empty store accepting any dimension
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that rejects records of another dimension
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            records: DashMap::new(),
            dimensions: Some(dimensions),
        }
    }

    fn check_dimensions(&self, record: &VectorRecord) -> Result<()> {
        match self.dimensions {
            Some(expected) if record.vector.dimensions() != expected => {
                Err(Error::vector_store(format!(
                    "record for product {} has {} dimensions, store expects {expected}",
                    record.product_id,
                    record.vector.dimensions()
                )))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VectorRecordStore for InMemoryVectorRecordStore {
    async fn put(&self, record: VectorRecord) -> Result<PutOutcome> {
        self.check_dimensions(&record)?;
        Ok(match self.records.entry(record.product_id) {
            Entry::Occupied(mut occupied) => {
                let current_version = occupied.get().source_version;
                if record.source_version <= current_version {
                    PutOutcome::Discarded { current_version }
                } else {
                    occupied.insert(Arc::new(record));
                    PutOutcome::Replaced {
                        previous_version: current_version,
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(record));
                PutOutcome::Inserted
            }
        })
    }

    async fn get(&self, product_id: ProductId) -> Result<Option<Arc<VectorRecord>>> {
        Ok(self
            .records
            .get(&product_id)
            .map(|record| Arc::clone(record.value())))
    }

    async fn remove(&self, product_id: ProductId) -> Result<Option<Arc<VectorRecord>>> {
        Ok(self.records.remove(&product_id).map(|(_, record)| record))
    }

    async fn remove_up_to(
        &self,
        product_id: ProductId,
        version: u64,
    ) -> Result<Option<Arc<VectorRecord>>> {
        Ok(self
            .records
            .remove_if(&product_id, |_, record| record.source_version <= version)
            .map(|(_, record)| record))
    }

    async fn scan(&self) -> Result<Vec<Arc<VectorRecord>>> {
        Ok(self
            .records
            .iter()
            .map(|record| Arc::clone(record.value()))
            .collect())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    async fn stats(&self) -> Result<HashMap<String, Value>> {
        Ok(HashMap::from([
            ("provider".to_string(), serde_json::json!(self.provider_name())),
            ("records".to_string(), serde_json::json!(self.records.len())),
            ("dimensions".to_string(), serde_json::json!(self.dimensions)),
        ]))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn memory_factory(
    config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorRecordStore>, String> {
    Ok(match config.dimensions {
        Some(dimensions) => Arc::new(InMemoryVectorRecordStore::with_dimensions(dimensions)),
        None => Arc::new(InMemoryVectorRecordStore::new()),
    })
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static MEMORY_STORE: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "memory",
    description: "In-memory vector record store (concurrent map, not persisted)",
    factory: memory_factory,
};
