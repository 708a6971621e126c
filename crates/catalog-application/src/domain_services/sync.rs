use async_trait::async_trait;
use catalog_domain::entities::ProductId;
use catalog_domain::error::Result;
use catalog_domain::events::DomainEvent;
use catalog_domain::value_objects::SyncStatus;
use serde::{Deserialize, Serialize};

/// Newest catalog version known for a product
///
/// Lets the search engine judge staleness without querying the relational
/// store on the hot path.
pub trait CatalogVersionView: Send + Sync {
    /// Latest version observed for `product_id`, if any
    fn latest_version(&self, product_id: ProductId) -> Option<u64>;
}

/// Counters describing synchronization activity since startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Catalog events handled
    pub events_handled: u64,
    /// Events ignored as duplicates or out of order
    pub events_ignored: u64,
    /// Embedding computations started
    pub computations_started: u64,
    /// Records written to the store
    pub records_stored: u64,
    /// Records removed after deletes
    pub records_removed: u64,
    /// Computed records the store or a delete made obsolete
    pub results_discarded: u64,
    /// Failed attempts scheduled for retry
    pub retries: u64,
    /// Products that exhausted their retries
    pub degraded: u64,
    /// Products waiting for or undergoing work
    pub pending: usize,
}

/// Synchronization Coordinator Interface
///
/// Consumes catalog mutation events and keeps the vector record store
/// converging on the relational catalog.
#[async_trait]
pub trait SyncCoordinatorInterface: Send + Sync {
    /// Apply one event from the catalog bus
    ///
    /// Idempotent: redelivered and out-of-order events leave the store in
    /// the state the newest version dictates.
    async fn handle_event(&self, event: DomainEvent) -> Result<()>;

    /// Recompute one product from the source of truth
    ///
    /// Returns whether work was scheduled. Clears a degraded flag.
    async fn resync_product(&self, product_id: ProductId) -> Result<bool>;

    /// Reconcile every product with the source of truth
    ///
    /// Schedules products whose record is missing, stale or degraded and
    /// removes records of products that no longer exist. Returns the number
    /// of products scheduled or removed.
    async fn resync_all(&self) -> Result<usize>;

    /// Current synchronization status of a product
    async fn sync_status(&self, product_id: ProductId) -> Result<Option<SyncStatus>>;

    /// Every product whose retries were exhausted
    async fn degraded_products(&self) -> Result<Vec<SyncStatus>>;

    /// Activity counters
    fn stats(&self) -> SyncStats;
}
