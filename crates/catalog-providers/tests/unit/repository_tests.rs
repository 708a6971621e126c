//! Tests for the in-memory product repository

use catalog_domain::entities::{ProductDraft, ProductId};
use catalog_providers::ProductRepository;
use catalog_providers::repository::InMemoryProductRepository;

#[tokio::test]
async fn test_versions_increment_on_every_write() {
    let repo = InMemoryProductRepository::new();

    let v1 = repo
        .upsert(ProductDraft::new(42, "Red mug", "", 9.5))
        .await
        .unwrap();
    let v2 = repo
        .upsert(ProductDraft::new(42, "Blue mug", "", 9.5))
        .await
        .unwrap();

    assert_eq!(v1.version, 1);
    assert_eq!(v2.version, 2);
    assert_eq!(
        repo.find_by_id(ProductId::new(42))
            .await
            .unwrap()
            .unwrap()
            .name,
        "Blue mug"
    );
}

#[tokio::test]
async fn test_delete_tombstones_and_recreation_continues_versions() {
    let repo = InMemoryProductRepository::new();
    repo.upsert(ProductDraft::new(1, "Kettle", "", 20.0))
        .await
        .unwrap();

    let tombstone = repo.delete(ProductId::new(1)).await.unwrap();
    assert_eq!(tombstone, 2);
    assert!(repo.find_by_id(ProductId::new(1)).await.unwrap().is_none());
    assert!(repo.delete(ProductId::new(1)).await.unwrap_err().is_not_found());

    let recreated = repo
        .upsert(ProductDraft::new(1, "Kettle", "", 20.0))
        .await
        .unwrap();
    assert_eq!(recreated.version, 3);
}

#[tokio::test]
async fn test_list_and_count_skip_deleted_rows() {
    let repo = InMemoryProductRepository::new();
    for id in [3, 1, 2] {
        repo.upsert(ProductDraft::new(id, format!("Item {id}"), "", 1.0))
            .await
            .unwrap();
    }
    repo.delete(ProductId::new(2)).await.unwrap();

    let ids: Vec<i64> = repo
        .list()
        .await
        .unwrap()
        .iter()
        .map(|p| p.id.get())
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_invalid_draft_is_rejected() {
    let repo = InMemoryProductRepository::new();
    let err = repo
        .upsert(ProductDraft::new(1, " ", "", 1.0))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("name"));
    assert_eq!(repo.count().await.unwrap(), 0);
}
