//! Tests for the in-memory vector record store

use std::sync::Arc;

use catalog_application::ports::registry::{
    VectorStoreProviderConfig, resolve_vector_store_provider,
};
use catalog_domain::entities::{ProductDraft, ProductId};
use catalog_domain::value_objects::{EmbeddingVector, PutOutcome, VectorRecord};
use catalog_providers::VectorRecordStore;
use catalog_providers::vector_store::InMemoryVectorRecordStore;

fn record(id: i64, version: u64, components: Vec<f32>) -> VectorRecord {
    let product = ProductDraft::new(id, format!("Product {id}"), "", 1.0).into_product(version);
    VectorRecord::for_product(&product, EmbeddingVector::normalized(components).unwrap())
}

#[tokio::test]
async fn test_put_is_version_gated() {
    let store = InMemoryVectorRecordStore::new();

    assert_eq!(
        store.put(record(1, 2, vec![1.0, 0.0])).await.unwrap(),
        PutOutcome::Inserted
    );
    assert_eq!(
        store.put(record(1, 1, vec![0.0, 1.0])).await.unwrap(),
        PutOutcome::Discarded { current_version: 2 }
    );
    assert_eq!(
        store.put(record(1, 2, vec![0.0, 1.0])).await.unwrap(),
        PutOutcome::Discarded { current_version: 2 }
    );
    assert_eq!(
        store.put(record(1, 3, vec![0.0, 1.0])).await.unwrap(),
        PutOutcome::Replaced {
            previous_version: 2
        }
    );

    let stored = store.get(ProductId::new(1)).await.unwrap().unwrap();
    assert_eq!(stored.source_version, 3);
    assert_eq!(stored.vector.as_slice(), &[0.0, 1.0]);
}

#[tokio::test]
async fn test_concurrent_puts_keep_highest_version() {
    let store = Arc::new(InMemoryVectorRecordStore::new());
    let mut handles = Vec::new();
    for version in 1..=50u64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .put(record(7, version, vec![1.0, version as f32]))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = store.get(ProductId::new(7)).await.unwrap().unwrap();
    assert_eq!(stored.source_version, 50);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_remove_up_to_spares_newer_records() {
    let store = InMemoryVectorRecordStore::new();
    store.put(record(3, 5, vec![1.0, 1.0])).await.unwrap();

    assert!(store.remove_up_to(ProductId::new(3), 4).await.unwrap().is_none());
    assert!(store.get(ProductId::new(3)).await.unwrap().is_some());

    let removed = store.remove_up_to(ProductId::new(3), 5).await.unwrap().unwrap();
    assert_eq!(removed.source_version, 5);
    assert!(store.get(ProductId::new(3)).await.unwrap().is_none());
    assert!(store.remove(ProductId::new(3)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_scan_snapshot_survives_later_writes() {
    let store = InMemoryVectorRecordStore::new();
    store.put(record(1, 1, vec![1.0, 0.0])).await.unwrap();
    store.put(record(2, 1, vec![0.0, 1.0])).await.unwrap();

    let snapshot = store.scan().await.unwrap();
    store.put(record(1, 2, vec![1.0, 1.0])).await.unwrap();
    store.remove(ProductId::new(2)).await.unwrap();

    assert_eq!(snapshot.len(), 2);
    let first = snapshot
        .iter()
        .find(|r| r.product_id.get() == 1)
        .unwrap();
    assert_eq!(first.source_version, 1);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_dimension_mismatch_is_rejected() {
    let store = InMemoryVectorRecordStore::with_dimensions(3);
    let err = store.put(record(1, 1, vec![1.0, 0.0])).await.unwrap_err();
    assert!(err.to_string().contains("store expects 3"));
    assert!(store.is_empty().await.unwrap());
}

#[tokio::test]
async fn test_registry_resolves_memory_store_and_reports_stats() {
    let store =
        resolve_vector_store_provider(&VectorStoreProviderConfig::new("memory").with_dimensions(2))
            .unwrap();
    store.put(record(9, 1, vec![0.5, 0.5])).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats["provider"], "memory");
    assert_eq!(stats["records"], 1);
    assert_eq!(stats["dimensions"], 2);
}
