//! Per-product synchronization bookkeeping
//!
//! Every transition happens while the caller holds the product's map
//! entry, so decisions about one product are serialized without a global
//! lock. No method here awaits.

use catalog_domain::entities::ProductId;
use catalog_domain::value_objects::{SyncState, SyncStatus, SyncTask};

use super::retry::RetryPolicy;

/// What an incoming change event should cause
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChangeDecision {
    /// Nothing is pending; push a task onto the queue
    Enqueue(SyncTask),
    /// A task is already queued or computing; its target was raised
    Superseded,
    /// The version is not newer than what the coordinator already knows
    Ignored,
}

/// What an incoming delete event should cause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeleteDecision {
    /// Remove records up to the tombstone and settle the product as removed
    Remove,
    /// Remove records up to the tombstone but keep pending work, which
    /// belongs to a version announced after the delete
    RemoveKeepPending,
    /// Already applied or older than the catalog
    Ignored,
}

/// What a worker should do with a dequeued task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartDecision {
    /// Compute the product; the newest target is given
    Compute(u64),
    /// Stale task: deleted, already served, or another worker holds the product
    Skip,
}

/// What a worker should do once its computation resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FinishDecision {
    /// The product is settled
    Done,
    /// A newer version arrived meanwhile; queue it now
    Requeue(SyncTask),
    /// Retry the same target after the backoff delay
    Retry { task: SyncTask, retry: u32 },
    /// Retries are exhausted
    Degraded { version: u64, attempts: u32 },
}

#[derive(Debug, Clone)]
pub(crate) struct ProductSyncEntry {
    pub(crate) state: SyncState,
    pub(crate) target_version: u64,
    /// Newest version the catalog itself confirmed, by a read or a delete
    pub(crate) catalog_version: u64,
    pub(crate) in_flight: Option<u64>,
    pub(crate) tombstone: Option<u64>,
    pub(crate) attempts: u32,
    pub(crate) degraded: bool,
    pub(crate) last_error: Option<String>,
}

impl Default for ProductSyncEntry {
    fn default() -> Self {
        Self {
            state: SyncState::Idle,
            target_version: 0,
            catalog_version: 0,
            in_flight: None,
            tombstone: None,
            attempts: 0,
            degraded: false,
            last_error: None,
        }
    }
}

impl ProductSyncEntry {
    /// Register catalog version `version`
    ///
    /// `force` accepts a version that is not newer than the current target,
    /// which is how operator re-syncs revive degraded products.
    pub(crate) fn on_change(
        &mut self,
        product_id: ProductId,
        version: u64,
        force: bool,
    ) -> ChangeDecision {
        if self.tombstone.is_some_and(|tombstone| version <= tombstone) {
            return ChangeDecision::Ignored;
        }
        if version <= self.target_version && !force {
            return ChangeDecision::Ignored;
        }

        self.target_version = self.target_version.max(version);
        self.attempts = 0;
        self.degraded = false;
        self.last_error = None;

        match self.state {
            SyncState::Queued | SyncState::Computing => ChangeDecision::Superseded,
            SyncState::Idle | SyncState::Deleting | SyncState::Removed => {
                self.state = SyncState::Queued;
                ChangeDecision::Enqueue(SyncTask::new(product_id, self.target_version))
            }
        }
    }

    /// Register a delete at tombstone `version`
    ///
    /// Targets announced by change events are not trusted to exist in the
    /// catalog yet, so only the tombstone and the catalog-confirmed version
    /// can reject a delete. A delete behind a pending target removes what is
    /// stored and leaves the pending work to find out whether the product
    /// was re-created.
    pub(crate) fn on_delete(&mut self, version: u64) -> DeleteDecision {
        if self.tombstone.is_some_and(|tombstone| version <= tombstone)
            || version <= self.catalog_version
        {
            return DeleteDecision::Ignored;
        }
        self.tombstone = Some(version);
        self.catalog_version = version;
        if version < self.target_version && self.state.is_pending() {
            return DeleteDecision::RemoveKeepPending;
        }
        self.target_version = version;
        self.attempts = 0;
        self.degraded = false;
        self.last_error = None;
        self.state = SyncState::Deleting;
        DeleteDecision::Remove
    }

    /// Mark a delete as applied, unless the product was re-created meanwhile
    pub(crate) fn finish_delete(&mut self) {
        if self.state == SyncState::Deleting {
            self.state = SyncState::Removed;
        }
    }

    /// Retire a record whose product vanished without a delete event
    ///
    /// Returns the tombstone to remove up to, or `None` while work for the
    /// product is still pending.
    pub(crate) fn on_orphan(&mut self, stored_version: u64) -> Option<u64> {
        if self.state.is_pending() {
            return None;
        }
        let tombstone = self.target_version.max(stored_version);
        self.tombstone = Some(tombstone);
        self.target_version = tombstone;
        self.catalog_version = self.catalog_version.max(tombstone);
        self.attempts = 0;
        self.degraded = false;
        self.last_error = None;
        self.state = SyncState::Removed;
        Some(tombstone)
    }

    /// Claim the product for computation
    pub(crate) fn start(&mut self) -> StartDecision {
        if self.state != SyncState::Queued || self.in_flight.is_some() {
            return StartDecision::Skip;
        }
        self.state = SyncState::Computing;
        self.in_flight = Some(self.target_version);
        StartDecision::Compute(self.target_version)
    }

    /// Whether a delete at or after `version` has been seen
    pub(crate) fn is_tombstoned(&self, version: u64) -> bool {
        self.tombstone.is_some_and(|tombstone| tombstone >= version)
    }

    /// Computation finished and the store holds `stored_version`
    ///
    /// When the catalog returned an older version than the one the task was
    /// started for, the announced version is not readable yet. That counts
    /// as a failed attempt so backoff and the retry budget apply.
    pub(crate) fn finish_success(
        &mut self,
        product_id: ProductId,
        stored_version: u64,
        retry: &RetryPolicy,
    ) -> FinishDecision {
        let requested = self.in_flight.take().unwrap_or(stored_version);
        self.catalog_version = self.catalog_version.max(stored_version);
        self.target_version = self.target_version.max(stored_version);
        match self.state {
            SyncState::Deleting | SyncState::Removed | SyncState::Idle => FinishDecision::Done,
            SyncState::Queued | SyncState::Computing => {
                if stored_version < requested && self.target_version <= requested {
                    let error = format!(
                        "catalog holds version {stored_version}, version {requested} was announced"
                    );
                    let decision = self.record_failure(product_id, requested, error, true, retry);
                    if self.degraded {
                        // Only the catalog's own version is known to exist
                        self.target_version = self.catalog_version;
                    }
                    return decision;
                }
                if self.target_version > stored_version {
                    self.state = SyncState::Queued;
                    FinishDecision::Requeue(SyncTask::new(product_id, self.target_version))
                } else {
                    self.state = SyncState::Idle;
                    self.attempts = 0;
                    self.last_error = None;
                    FinishDecision::Done
                }
            }
        }
    }

    /// The product no longer exists in the source of truth
    pub(crate) fn finish_missing(&mut self, product_id: ProductId, version: u64) -> FinishDecision {
        self.in_flight = None;
        match self.state {
            SyncState::Queued | SyncState::Computing if self.target_version > version => {
                self.state = SyncState::Queued;
                FinishDecision::Requeue(SyncTask::new(product_id, self.target_version))
            }
            SyncState::Queued | SyncState::Computing if self.tombstone.is_some() => {
                self.state = SyncState::Removed;
                FinishDecision::Done
            }
            SyncState::Queued | SyncState::Computing => {
                self.state = SyncState::Idle;
                FinishDecision::Done
            }
            SyncState::Idle | SyncState::Deleting | SyncState::Removed => FinishDecision::Done,
        }
    }

    /// Computation of `version` failed
    pub(crate) fn finish_failure(
        &mut self,
        product_id: ProductId,
        version: u64,
        error: String,
        retryable: bool,
        retry: &RetryPolicy,
    ) -> FinishDecision {
        self.in_flight = None;
        match self.state {
            SyncState::Deleting | SyncState::Removed | SyncState::Idle => {
                return FinishDecision::Done;
            }
            SyncState::Queued | SyncState::Computing => {}
        }
        if self.target_version > version {
            // A newer version arrived; its attempt budget starts fresh
            self.state = SyncState::Queued;
            return FinishDecision::Requeue(SyncTask::new(product_id, self.target_version));
        }
        self.record_failure(product_id, version, error, retryable, retry)
    }

    fn record_failure(
        &mut self,
        product_id: ProductId,
        version: u64,
        error: String,
        retryable: bool,
        retry: &RetryPolicy,
    ) -> FinishDecision {
        self.attempts += 1;
        self.last_error = Some(error);
        if retryable && retry.allows_retry(self.attempts) {
            self.state = SyncState::Queued;
            return FinishDecision::Retry {
                task: SyncTask::new(product_id, version),
                retry: self.attempts,
            };
        }

        self.state = SyncState::Idle;
        self.degraded = true;
        FinishDecision::Degraded {
            version,
            attempts: self.attempts,
        }
    }

    pub(crate) fn status(&self, product_id: ProductId, stored_version: Option<u64>) -> SyncStatus {
        SyncStatus {
            product_id,
            state: self.state,
            target_version: self.target_version,
            stored_version,
            attempts: self.attempts,
            degraded: self.degraded,
            last_error: self.last_error.clone(),
        }
    }
}
