//! Catalog Domain Events
//!
//! Mutation events are emitted by the catalog facade after the relational
//! write succeeds and consumed by the synchronization coordinator.
//! Notification events are emitted by the coordinator so operators and
//! other services can observe index progress.

use crate::entities::ProductId;
use serde::{Deserialize, Serialize};

/// Events exchanged over the catalog message bus
///
/// Delivery is at-least-once: consumers must tolerate duplicates and
/// out-of-order arrival within a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A product was created or updated
    ProductChanged {
        /// Product that changed
        product_id: ProductId,
        /// Catalog version after the change
        version: u64,
    },
    /// A product was deleted
    ProductDeleted {
        /// Product that was deleted
        product_id: ProductId,
        /// Tombstone version written by the relational store
        version: u64,
    },
    /// An operator asked for vectors to be recomputed
    ResyncRequested {
        /// Single product, or every product when `None`
        product_id: Option<ProductId>,
    },
    /// A fresh vector record was stored
    VectorRecordStored {
        /// Product whose record was stored
        product_id: ProductId,
        /// Version of the stored record
        version: u64,
    },
    /// A vector record was removed after a delete
    VectorRecordRemoved {
        /// Product whose record was removed
        product_id: ProductId,
    },
    /// Retries were exhausted for a product; its vector is stale or absent
    SyncDegraded {
        /// Affected product
        product_id: ProductId,
        /// Version that could not be embedded
        version: u64,
        /// Attempts made before giving up
        attempts: u32,
        /// Last failure observed
        reason: String,
    },
    /// The bus dropped events for a slow subscriber
    StreamLagged {
        /// Number of events that were skipped
        skipped: u64,
    },
}

impl DomainEvent {
    /// Product the event refers to, if it refers to exactly one
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::ProductChanged { product_id, .. }
            | Self::ProductDeleted { product_id, .. }
            | Self::VectorRecordStored { product_id, .. }
            | Self::VectorRecordRemoved { product_id }
            | Self::SyncDegraded { product_id, .. } => Some(*product_id),
            Self::ResyncRequested { product_id } => *product_id,
            Self::StreamLagged { .. } => None,
        }
    }

    /// Whether the event describes a catalog mutation
    pub fn is_catalog_mutation(&self) -> bool {
        matches!(
            self,
            Self::ProductChanged { .. } | Self::ProductDeleted { .. }
        )
    }

    /// Short event name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProductChanged { .. } => "product_changed",
            Self::ProductDeleted { .. } => "product_deleted",
            Self::ResyncRequested { .. } => "resync_requested",
            Self::VectorRecordStored { .. } => "vector_record_stored",
            Self::VectorRecordRemoved { .. } => "vector_record_removed",
            Self::SyncDegraded { .. } => "sync_degraded",
            Self::StreamLagged { .. } => "stream_lagged",
        }
    }
}
