//! Similarity search engine tests
//!
//! Records are written straight into the in-memory store with hand-picked
//! vectors so scores are known exactly.

use std::collections::HashMap;
use std::sync::Arc;

use catalog_application::domain_services::{CatalogVersionView, SearchEngineInterface};
use catalog_application::ports::VectorRecordStore;
use catalog_application::use_cases::SimilaritySearchEngine;
use catalog_domain::entities::ProductId;
use catalog_domain::error::Error;
use catalog_domain::value_objects::{
    EmbeddingVector, ProductFilter, SearchOptions, SearchResult, VectorRecord,
};
use catalog_providers::vector_store::InMemoryVectorRecordStore;

use crate::test_utils::product;

struct FixedVersions(HashMap<ProductId, u64>);

impl CatalogVersionView for FixedVersions {
    fn latest_version(&self, product_id: ProductId) -> Option<u64> {
        self.0.get(&product_id).copied()
    }
}

fn vector(components: &[f32]) -> EmbeddingVector {
    EmbeddingVector::normalized(components.to_vec()).unwrap()
}

async fn put(
    store: &InMemoryVectorRecordStore,
    id: i64,
    name: &str,
    price: f64,
    version: u64,
    components: &[f32],
) {
    let product = product(id, name, "", price, version);
    store
        .put(VectorRecord::for_product(&product, vector(components)))
        .await
        .unwrap();
}

/// Five products at increasing angles from the x axis
async fn seeded_store() -> Arc<InMemoryVectorRecordStore> {
    let store = Arc::new(InMemoryVectorRecordStore::new());
    put(&store, 1, "Red mug", 8.0, 1, &[1.0, 0.0, 0.0]).await;
    put(&store, 2, "Blue mug", 9.0, 1, &[0.9, 0.1, 0.0]).await;
    put(&store, 3, "Ceramic bowl", 15.0, 1, &[0.5, 0.5, 0.0]).await;
    put(&store, 4, "Steel kettle", 40.0, 1, &[0.0, 1.0, 0.0]).await;
    put(&store, 5, "Wool blanket", 60.0, 1, &[-1.0, 0.0, 0.0]).await;
    store
}

fn ids(results: &[SearchResult]) -> Vec<i64> {
    results.iter().map(|r| r.product_id.get()).collect()
}

#[tokio::test]
async fn test_results_are_ranked_by_cosine_similarity() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);

    let results = engine
        .search(&vector(&[1.0, 0.0, 0.0]), 5, &SearchOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![1, 2, 3, 4, 5]);
    assert_eq!(
        results.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[4].score + 1.0).abs() < 1e-6);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(results[1].name, "Blue mug");
    assert_eq!(results[1].source_version, 1);
}

#[tokio::test]
async fn test_result_count_is_bounded_by_k() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);
    let query = vector(&[0.0, 1.0, 0.0]);

    let top_two = engine.search(&query, 2, &SearchOptions::new()).await.unwrap();
    assert_eq!(ids(&top_two), vec![4, 3]);

    let all = engine.search(&query, 50, &SearchOptions::new()).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn test_zero_k_is_invalid() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);

    let err = engine
        .search(&vector(&[1.0, 0.0, 0.0]), 0, &SearchOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_empty_store_returns_no_results() {
    let engine = SimilaritySearchEngine::new(Arc::new(InMemoryVectorRecordStore::new()));

    let results = engine
        .search(&vector(&[1.0, 0.0]), 3, &SearchOptions::new())
        .await
        .unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_equal_scores_order_by_product_id() {
    let store = Arc::new(InMemoryVectorRecordStore::new());
    put(&store, 9, "Mug nine", 1.0, 1, &[0.0, 1.0]).await;
    put(&store, 3, "Mug three", 1.0, 1, &[0.0, 1.0]).await;
    put(&store, 6, "Mug six", 1.0, 1, &[0.0, 1.0]).await;
    let engine = SimilaritySearchEngine::new(store);

    let results = engine
        .search(&vector(&[0.0, 1.0]), 2, &SearchOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![3, 6]);
}

#[tokio::test]
async fn test_identical_queries_return_identical_results() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);
    let query = vector(&[0.3, 0.7, 0.1]);

    let first = engine.search(&query, 4, &SearchOptions::new()).await.unwrap();
    let second = engine.search(&query, 4, &SearchOptions::new()).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unnormalized_query_is_normalized() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);
    let query = EmbeddingVector::new(vec![10.0, 0.0, 0.0]).unwrap();

    let results = engine.search(&query, 1, &SearchOptions::new()).await.unwrap();

    assert_eq!(ids(&results), vec![1]);
    assert!(results[0].score <= 1.0);
}

#[tokio::test]
async fn test_filter_applies_before_ranking() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);
    let query = vector(&[1.0, 0.0, 0.0]);

    let by_price = SearchOptions::new()
        .with_filter(ProductFilter::new().with_price_range(Some(10.0), Some(50.0)));
    let results = engine.search(&query, 2, &by_price).await.unwrap();
    assert_eq!(ids(&results), vec![3, 4]);
    assert_eq!(results[0].rank, 1);

    let by_name = SearchOptions::new().with_filter(ProductFilter::new().with_name_contains("MUG"));
    let results = engine.search(&query, 5, &by_name).await.unwrap();
    assert_eq!(ids(&results), vec![1, 2]);

    let by_id = SearchOptions::new().with_filter(
        ProductFilter::new().with_product_ids([ProductId::new(5), ProductId::new(4)]),
    );
    let results = engine.search(&query, 5, &by_id).await.unwrap();
    assert_eq!(ids(&results), vec![4, 5]);
}

#[tokio::test]
async fn test_stale_records_are_excluded_on_request() {
    let store = seeded_store().await;
    let versions = FixedVersions(HashMap::from([
        (ProductId::new(1), 3),
        (ProductId::new(2), 2),
    ]));
    let engine = SimilaritySearchEngine::new(store).with_version_view(Arc::new(versions));
    let query = vector(&[1.0, 0.0, 0.0]);

    let fresh_only = engine
        .search(&query, 5, &SearchOptions::new().with_max_staleness(0))
        .await
        .unwrap();
    assert_eq!(ids(&fresh_only), vec![3, 4, 5]);

    let one_behind = engine
        .search(&query, 5, &SearchOptions::new().with_max_staleness(1))
        .await
        .unwrap();
    assert_eq!(ids(&one_behind), vec![2, 3, 4, 5]);

    let unbounded = engine.search(&query, 5, &SearchOptions::new()).await.unwrap();
    assert_eq!(unbounded.len(), 5);
}

#[tokio::test]
async fn test_records_of_another_dimension_are_skipped() {
    let store = Arc::new(InMemoryVectorRecordStore::new());
    put(&store, 1, "Flat", 1.0, 1, &[1.0, 0.0]).await;
    put(&store, 2, "Deep", 1.0, 1, &[1.0, 0.0, 0.0]).await;
    let engine = SimilaritySearchEngine::new(store);

    let results = engine
        .search(&vector(&[1.0, 0.0, 0.0]), 5, &SearchOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![2]);
}

#[tokio::test]
async fn test_lexical_search_scores_word_overlap() {
    let engine = SimilaritySearchEngine::new(seeded_store().await);

    let results = engine
        .lexical_search("blue MUG", 5, &SearchOptions::new())
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![2, 1]);
    assert!((results[0].score - 1.0).abs() < 1e-6);
    assert!((results[1].score - 0.5).abs() < 1e-6);

    let err = engine
        .lexical_search("?!", 5, &SearchOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}
