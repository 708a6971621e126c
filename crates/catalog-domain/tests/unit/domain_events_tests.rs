//! Tests for catalog domain events

use catalog_domain::entities::ProductId;
use catalog_domain::events::DomainEvent;

#[test]
fn test_event_serialization_is_tagged() {
    let event = DomainEvent::ProductChanged {
        product_id: ProductId::new(42),
        version: 3,
    };
    let json = serde_json::to_value(&event).expect("serialize");
    assert_eq!(json["type"], "product_changed");
    assert_eq!(json["product_id"], 42);
    assert_eq!(json["version"], 3);

    let back: DomainEvent = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, event);
}

#[test]
fn test_mutation_classification() {
    let changed = DomainEvent::ProductChanged {
        product_id: ProductId::new(1),
        version: 1,
    };
    let deleted = DomainEvent::ProductDeleted {
        product_id: ProductId::new(1),
        version: 2,
    };
    let stored = DomainEvent::VectorRecordStored {
        product_id: ProductId::new(1),
        version: 1,
    };
    let lagged = DomainEvent::StreamLagged { skipped: 10 };

    assert!(changed.is_catalog_mutation());
    assert!(deleted.is_catalog_mutation());
    assert!(!stored.is_catalog_mutation());
    assert!(!lagged.is_catalog_mutation());

    assert_eq!(changed.product_id(), Some(ProductId::new(1)));
    assert_eq!(lagged.product_id(), None);
    assert_eq!(
        DomainEvent::ResyncRequested { product_id: None }.product_id(),
        None
    );
}

#[test]
fn test_event_names() {
    assert_eq!(
        DomainEvent::SyncDegraded {
            product_id: ProductId::new(5),
            version: 2,
            attempts: 4,
            reason: "offline".to_string(),
        }
        .name(),
        "sync_degraded"
    );
    assert_eq!(DomainEvent::StreamLagged { skipped: 1 }.name(), "stream_lagged");
}
