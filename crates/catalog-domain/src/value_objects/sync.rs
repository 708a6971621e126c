//! Synchronization Value Objects

use crate::entities::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pending re-embedding work for one product
///
/// At most one task per product is active at a time. A newer catalog
/// version supersedes the requested version in place instead of queueing a
/// second task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTask {
    /// Product to re-embed
    pub product_id: ProductId,
    /// Catalog version the task was created for
    pub requested_version: u64,
    /// When the task entered the queue
    pub enqueued_at: DateTime<Utc>,
}

impl SyncTask {
    /// Create a task stamped with the current time
    pub fn new(product_id: ProductId, requested_version: u64) -> Self {
        Self {
            product_id,
            requested_version,
            enqueued_at: Utc::now(),
        }
    }
}

/// Per-product synchronization state
///
/// ```text
/// Idle ──event──▶ Queued ──worker──▶ Computing ──stored──▶ Idle
///                   ▲                    │
///                   └──retry / newer─────┘
///
/// any ──delete──▶ Deleting ──removed──▶ Removed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Nothing pending
    Idle,
    /// A task is waiting in the queue or in backoff
    Queued,
    /// A worker is embedding the product
    Computing,
    /// A delete is being applied
    Deleting,
    /// The product was deleted and its record removed
    Removed,
}

impl SyncState {
    /// Whether work for this product is outstanding
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Queued | Self::Computing | Self::Deleting)
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Queued => "queued",
            Self::Computing => "computing",
            Self::Deleting => "deleting",
            Self::Removed => "removed",
        };
        f.write_str(name)
    }
}

/// Observable synchronization status of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    /// Product
    pub product_id: ProductId,
    /// Current state
    pub state: SyncState,
    /// Newest catalog version the coordinator has seen
    pub target_version: u64,
    /// Version currently held by the vector store, if any
    pub stored_version: Option<u64>,
    /// Failed attempts for the current target
    pub attempts: u32,
    /// Retries were exhausted for the current target
    pub degraded: bool,
    /// Last failure message
    pub last_error: Option<String>,
}

impl SyncStatus {
    /// Whether the stored record lags the newest known version
    pub fn is_stale(&self) -> bool {
        if self.state == SyncState::Removed {
            return false;
        }
        self.stored_version
            .is_none_or(|stored| stored < self.target_version)
    }
}
