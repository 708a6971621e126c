//! Tests for vector records and sync status

use catalog_domain::entities::{ProductDraft, ProductId};
use catalog_domain::value_objects::{
    EmbeddingVector, PutOutcome, SyncState, SyncStatus, VectorRecord,
};

#[test]
fn test_record_captures_product_version_and_snapshot() {
    let product = ProductDraft::new(42, "Red mug", "Stoneware", 12.5).into_product(7);
    let vector = EmbeddingVector::normalized(vec![0.6, 0.8]).expect("vector");
    let record = VectorRecord::for_product(&product, vector.clone());

    assert_eq!(record.product_id, ProductId::new(42));
    assert_eq!(record.source_version, 7);
    assert_eq!(record.snapshot.name, "Red mug");
    assert_eq!(record.snapshot.price, 12.5);
    assert_eq!(record.vector, vector);
}

#[test]
fn test_staleness() {
    let product = ProductDraft::new(1, "Mug", "", 1.0).into_product(3);
    let record = VectorRecord::for_product(
        &product,
        EmbeddingVector::normalized(vec![1.0]).expect("vector"),
    );
    assert_eq!(record.staleness(3), 0);
    assert!(!record.is_stale(3));
    assert_eq!(record.staleness(5), 2);
    assert!(record.is_stale(5));
    assert_eq!(record.staleness(1), 0);
}

#[test]
fn test_put_outcome_applied() {
    assert!(PutOutcome::Inserted.is_applied());
    assert!(PutOutcome::Replaced { previous_version: 1 }.is_applied());
    assert!(!PutOutcome::Discarded { current_version: 4 }.is_applied());
}

#[test]
fn test_sync_status_staleness() {
    let mut status = SyncStatus {
        product_id: ProductId::new(1),
        state: SyncState::Idle,
        target_version: 3,
        stored_version: Some(3),
        attempts: 0,
        degraded: false,
        last_error: None,
    };
    assert!(!status.is_stale());

    status.target_version = 4;
    assert!(status.is_stale());

    status.stored_version = None;
    assert!(status.is_stale());

    status.state = SyncState::Removed;
    assert!(!status.is_stale());
}

#[test]
fn test_sync_state_pending() {
    assert!(SyncState::Queued.is_pending());
    assert!(SyncState::Computing.is_pending());
    assert!(SyncState::Deleting.is_pending());
    assert!(!SyncState::Idle.is_pending());
    assert!(!SyncState::Removed.is_pending());
    assert_eq!(SyncState::Computing.to_string(), "computing");
}
