//! Tests for event bus providers

use std::time::Duration;

use catalog_domain::entities::ProductId;
use catalog_providers::EventBusProvider;
use catalog_providers::events::{DomainEvent, NullEventBusProvider, TokioEventBusProvider};
use futures::StreamExt;

fn changed(id: i64, version: u64) -> DomainEvent {
    DomainEvent::ProductChanged {
        product_id: ProductId::new(id),
        version,
    }
}

#[tokio::test]
async fn test_tokio_bus_delivers_to_every_subscriber() {
    let bus = TokioEventBusProvider::new();
    assert!(!bus.has_subscribers());

    let mut first = bus.subscribe_events().await.unwrap();
    let mut second = bus.subscribe_events().await.unwrap();
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish_event(changed(1, 1)).await.unwrap();

    assert_eq!(first.next().await, Some(changed(1, 1)));
    assert_eq!(second.next().await, Some(changed(1, 1)));
}

#[tokio::test]
async fn test_tokio_bus_reports_lag() {
    let bus = TokioEventBusProvider::with_capacity(2);
    let mut stream = bus.subscribe_events().await.unwrap();

    for version in 1..=5 {
        bus.publish_event(changed(1, version)).await.unwrap();
    }

    assert_eq!(
        stream.next().await,
        Some(DomainEvent::StreamLagged { skipped: 3 })
    );
    assert_eq!(stream.next().await, Some(changed(1, 4)));
    assert_eq!(stream.next().await, Some(changed(1, 5)));
}

#[tokio::test]
async fn test_publish_without_subscribers_succeeds() {
    let bus = TokioEventBusProvider::new();
    assert!(bus.publish_event(changed(1, 1)).await.is_ok());
}

#[tokio::test]
async fn test_null_bus_never_yields() {
    let bus = NullEventBusProvider::new();
    bus.publish_event(changed(1, 1)).await.unwrap();
    let mut stream = bus.subscribe_events().await.unwrap();

    let next = tokio::time::timeout(Duration::from_millis(20), stream.next()).await;
    assert!(next.is_err(), "null bus must not yield events");
    assert!(!bus.has_subscribers());
    assert_eq!(bus.provider_name(), "null");
}
