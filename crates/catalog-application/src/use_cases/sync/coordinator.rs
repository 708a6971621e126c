//! Synchronization coordinator use case
//!
//! One consumer task reads catalog events from the bus and turns them into
//! per-product state transitions. A bounded queue feeds a fixed pool of
//! workers that embed products and write vector records. The bounded queue
//! is the backpressure point: when it is full the consumer stops reading
//! the bus.
//!
//! Guarantees:
//! - at most one computation per product at a time
//! - a burst of changes to one product collapses into one pending task
//! - the stored `source_version` only moves forward
//! - a delete wins over any computation for an older version

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog_domain::entities::ProductId;
use catalog_domain::error::{Error, Result};
use catalog_domain::events::DomainEvent;
use catalog_domain::value_objects::{PutOutcome, SyncStatus, SyncTask, VectorRecord};
use dashmap::DashMap;
use futures::StreamExt;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::retry::RetryPolicy;
use super::state::{
    ChangeDecision, DeleteDecision, FinishDecision, ProductSyncEntry, StartDecision,
};
use crate::domain_services::{CatalogVersionView, SyncCoordinatorInterface, SyncStats};
use crate::ports::{DomainEventStream, EventBusProvider, ProductRepository, VectorRecordStore};
use crate::use_cases::EmbeddingPipeline;

/// Coordinator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncCoordinatorConfig {
    /// Embedding workers
    pub workers: usize,
    /// Capacity of the task queue
    pub queue_capacity: usize,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for SyncCoordinatorConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            queue_capacity: 1024,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Default)]
struct SyncCounters {
    events_handled: AtomicU64,
    events_ignored: AtomicU64,
    computations_started: AtomicU64,
    records_stored: AtomicU64,
    records_removed: AtomicU64,
    results_discarded: AtomicU64,
    retries: AtomicU64,
    degraded: AtomicU64,
}

impl SyncCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of one successful computation
struct Computed {
    version: u64,
    outcome: PutOutcome,
}

/// Keeps vector records converging on the relational catalog
pub struct SyncCoordinator {
    repository: Arc<dyn ProductRepository>,
    pipeline: Arc<EmbeddingPipeline>,
    store: Arc<dyn VectorRecordStore>,
    event_bus: Arc<dyn EventBusProvider>,
    config: SyncCoordinatorConfig,
    entries: DashMap<ProductId, ProductSyncEntry>,
    sender: mpsc::Sender<SyncTask>,
    receiver: Mutex<mpsc::Receiver<SyncTask>>,
    counters: SyncCounters,
    shutdown: CancellationToken,
    started: AtomicBool,
}

impl SyncCoordinator {
    /// Create a coordinator; call [`SyncCoordinator::start`] to run it
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        pipeline: Arc<EmbeddingPipeline>,
        store: Arc<dyn VectorRecordStore>,
        event_bus: Arc<dyn EventBusProvider>,
        config: SyncCoordinatorConfig,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        Self {
            repository,
            pipeline,
            store,
            event_bus,
            config,
            entries: DashMap::new(),
            sender,
            receiver: Mutex::new(receiver),
            counters: SyncCounters::default(),
            shutdown: CancellationToken::new(),
            started: AtomicBool::new(false),
        }
    }

    /// Subscribe to the bus and spawn the consumer and the worker pool
    ///
    /// Fails if the coordinator is already running.
    pub async fn start(self: &Arc<Self>) -> Result<SyncHandle> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(Error::internal("sync coordinator already started"));
        }
        let events = match self.event_bus.subscribe_events().await {
            Ok(events) => events,
            Err(e) => {
                self.started.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let workers = self.config.workers.max(1);
        let mut tasks = Vec::with_capacity(workers + 1);
        tasks.push(tokio::spawn(Arc::clone(self).run_consumer(events)));
        for worker in 0..workers {
            tasks.push(tokio::spawn(Arc::clone(self).run_worker(worker)));
        }
        info!(
            workers,
            queue_capacity = self.config.queue_capacity,
            event_bus = self.event_bus.provider_name(),
            "sync coordinator started"
        );

        Ok(SyncHandle {
            shutdown: self.shutdown.clone(),
            tasks,
        })
    }

    /// Wait until no product has pending work, up to `timeout`
    ///
    /// Returns whether the coordinator went idle in time.
    pub async fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.pending() == 0 {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state.is_pending())
            .count()
    }

    async fn run_consumer(self: Arc<Self>, mut events: DomainEventStream) {
        loop {
            let event = tokio::select! {
                () = self.shutdown.cancelled() => break,
                event = events.next() => event,
            };
            let Some(event) = event else {
                warn!("catalog event stream closed");
                break;
            };
            let name = event.name();
            if let Err(e) = self.handle_event(event).await {
                warn!(event = name, error = %e, "failed to handle catalog event");
            }
        }
        debug!("sync event consumer stopped");
    }

    async fn run_worker(self: Arc<Self>, worker: usize) {
        loop {
            let task = tokio::select! {
                () = self.shutdown.cancelled() => break,
                task = async { self.receiver.lock().await.recv().await } => task,
            };
            let Some(task) = task else {
                break;
            };
            self.process(task).await;
        }
        debug!(worker, "sync worker stopped");
    }

    async fn enqueue(&self, task: SyncTask) {
        tokio::select! {
            () = self.shutdown.cancelled() => {}
            result = self.sender.send(task) => {
                if result.is_err() {
                    warn!("sync queue closed");
                }
            }
        }
    }

    /// Requeue from a worker without waiting on a full queue
    fn requeue(&self, task: SyncTask) {
        match self.sender.try_send(task) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(task)) => {
                let sender = self.sender.clone();
                let shutdown = self.shutdown.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        () = shutdown.cancelled() => {}
                        _ = sender.send(task) => {}
                    }
                });
            }
            Err(mpsc::error::TrySendError::Closed(_)) => warn!("sync queue closed"),
        }
    }

    fn schedule_retry(&self, task: SyncTask, delay: Duration) {
        let sender = self.sender.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = shutdown.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    let product_id = task.product_id;
                    if sender.send(task).await.is_err() {
                        warn!(product_id = %product_id, "sync queue closed, retry dropped");
                    }
                }
            }
        });
    }

    async fn notify(&self, event: DomainEvent) {
        let name = event.name();
        if let Err(e) = self.event_bus.publish_event(event).await {
            debug!(event = name, error = %e, "failed to publish sync notification");
        }
    }

    async fn on_change(&self, product_id: ProductId, version: u64, force: bool) -> ChangeDecision {
        let decision = self
            .entries
            .entry(product_id)
            .or_default()
            .on_change(product_id, version, force);

        match &decision {
            ChangeDecision::Enqueue(task) => {
                debug!(product_id = %product_id, version, "sync task queued");
                self.enqueue(task.clone()).await;
            }
            ChangeDecision::Superseded => {
                debug!(product_id = %product_id, version, "pending sync task superseded");
            }
            ChangeDecision::Ignored => {
                SyncCounters::bump(&self.counters.events_ignored);
                debug!(product_id = %product_id, version, "change ignored as not newer");
            }
        }
        decision
    }

    async fn on_delete(&self, product_id: ProductId, version: u64) -> Result<()> {
        let decision = self.entries.entry(product_id).or_default().on_delete(version);
        if decision == DeleteDecision::Ignored {
            SyncCounters::bump(&self.counters.events_ignored);
            debug!(product_id = %product_id, version, "delete ignored as not newer");
            return Ok(());
        }

        let removed = self.store.remove_up_to(product_id, version).await;
        if decision == DeleteDecision::Remove {
            if let Some(mut entry) = self.entries.get_mut(&product_id) {
                entry.finish_delete();
            }
        }
        if removed?.is_some() {
            SyncCounters::bump(&self.counters.records_removed);
            self.notify(DomainEvent::VectorRecordRemoved { product_id })
                .await;
        }
        debug!(product_id = %product_id, version, "product removed from index");
        Ok(())
    }

    async fn remove_orphan(&self, product_id: ProductId, stored_version: u64) -> Result<bool> {
        let tombstone = self
            .entries
            .entry(product_id)
            .or_default()
            .on_orphan(stored_version);
        let Some(tombstone) = tombstone else {
            return Ok(false);
        };
        let removed = self.store.remove_up_to(product_id, tombstone).await?;
        if removed.is_some() {
            SyncCounters::bump(&self.counters.records_removed);
            info!(product_id = %product_id, "removed vector of a product missing from the catalog");
            self.notify(DomainEvent::VectorRecordRemoved { product_id })
                .await;
        }
        Ok(removed.is_some())
    }

    async fn process(&self, task: SyncTask) {
        let product_id = task.product_id;
        let decision = self
            .entries
            .get_mut(&product_id)
            .map_or(StartDecision::Skip, |mut entry| entry.start());
        let StartDecision::Compute(target) = decision else {
            debug!(product_id = %product_id, requested = task.requested_version, "stale sync task skipped");
            return;
        };
        SyncCounters::bump(&self.counters.computations_started);

        let finish = match self.compute(product_id).await {
            Ok(Some(computed)) => self.apply(product_id, computed).await,
            Ok(None) => {
                debug!(product_id = %product_id, "product vanished before it could be embedded");
                self.entries
                    .get_mut(&product_id)
                    .map_or(FinishDecision::Done, |mut entry| {
                        entry.finish_missing(product_id, target)
                    })
            }
            Err(e) => {
                let retryable = e.is_retryable();
                self.entries
                    .get_mut(&product_id)
                    .map_or(FinishDecision::Done, |mut entry| {
                        entry.finish_failure(
                            product_id,
                            target,
                            e.to_string(),
                            retryable,
                            &self.config.retry,
                        )
                    })
            }
        };

        match finish {
            FinishDecision::Done => {}
            FinishDecision::Requeue(task) => {
                debug!(product_id = %product_id, version = task.requested_version, "newer version arrived during computation");
                self.requeue(task);
            }
            FinishDecision::Retry { task, retry } => {
                SyncCounters::bump(&self.counters.retries);
                let delay = self.config.retry.delay(retry);
                warn!(
                    product_id = %product_id,
                    version = task.requested_version,
                    attempt = retry,
                    delay_ms = delay.as_millis(),
                    "sync attempt failed, retrying"
                );
                self.schedule_retry(task, delay);
            }
            FinishDecision::Degraded { version, attempts } => {
                SyncCounters::bump(&self.counters.degraded);
                let reason = self
                    .entries
                    .get(&product_id)
                    .and_then(|entry| entry.last_error.clone())
                    .unwrap_or_default();
                let error = Error::sync_degraded(product_id, attempts, reason.clone());
                warn!(product_id = %product_id, version, error = %error, "product sync degraded");
                self.notify(DomainEvent::SyncDegraded {
                    product_id,
                    version,
                    attempts,
                    reason,
                })
                .await;
            }
        }
    }

    /// Read, embed and store the product at its current version
    async fn compute(&self, product_id: ProductId) -> Result<Option<Computed>> {
        let Some(product) = self.repository.find_by_id(product_id).await? else {
            return Ok(None);
        };
        let vector = self.pipeline.embed_product(&product).await?;
        let record = VectorRecord::for_product(&product, vector);
        let version = record.source_version;
        let outcome = self.store.put(record).await?;
        Ok(Some(Computed { version, outcome }))
    }

    async fn apply(&self, product_id: ProductId, computed: Computed) -> FinishDecision {
        let Computed { version, outcome } = computed;
        let tombstone = self
            .entries
            .get(&product_id)
            .and_then(|entry| entry.is_tombstoned(version).then_some(entry.tombstone))
            .flatten();

        if let Some(tombstone) = tombstone {
            // A delete overtook the computation
            SyncCounters::bump(&self.counters.results_discarded);
            match self.store.remove_up_to(product_id, tombstone).await {
                Ok(Some(_)) => debug!(product_id = %product_id, version, "late result removed after delete"),
                Ok(None) => {}
                Err(e) => warn!(product_id = %product_id, error = %e, "failed to remove late result"),
            }
        } else if let PutOutcome::Discarded { current_version } = outcome {
            SyncCounters::bump(&self.counters.results_discarded);
            debug!(product_id = %product_id, version, current_version, "store already holds a newer record");
        } else {
            SyncCounters::bump(&self.counters.records_stored);
            debug!(product_id = %product_id, version, "vector record stored");
            self.notify(DomainEvent::VectorRecordStored {
                product_id,
                version,
            })
            .await;
        }

        let stored_version = match outcome {
            PutOutcome::Discarded { current_version } => current_version.max(version),
            PutOutcome::Inserted | PutOutcome::Replaced { .. } => version,
        };
        self.entries
            .get_mut(&product_id)
            .map_or(FinishDecision::Done, |mut entry| {
                entry.finish_success(product_id, stored_version, &self.config.retry)
            })
    }

    async fn stored_version(&self, product_id: ProductId) -> Result<Option<u64>> {
        Ok(self
            .store
            .get(product_id)
            .await?
            .map(|record| record.source_version))
    }
}

#[async_trait]
impl SyncCoordinatorInterface for SyncCoordinator {
    async fn handle_event(&self, event: DomainEvent) -> Result<()> {
        match event {
            DomainEvent::ProductChanged {
                product_id,
                version,
            } => {
                SyncCounters::bump(&self.counters.events_handled);
                self.on_change(product_id, version, false).await;
                Ok(())
            }
            DomainEvent::ProductDeleted {
                product_id,
                version,
            } => {
                SyncCounters::bump(&self.counters.events_handled);
                self.on_delete(product_id, version).await
            }
            DomainEvent::ResyncRequested {
                product_id: Some(product_id),
            } => self.resync_product(product_id).await.map(|_| ()),
            DomainEvent::ResyncRequested { product_id: None } => {
                self.resync_all().await.map(|_| ())
            }
            DomainEvent::StreamLagged { skipped } => {
                warn!(skipped, "catalog events were dropped, reconciling the index");
                self.resync_all().await.map(|_| ())
            }
            DomainEvent::VectorRecordStored { .. }
            | DomainEvent::VectorRecordRemoved { .. }
            | DomainEvent::SyncDegraded { .. } => Ok(()),
        }
    }

    async fn resync_product(&self, product_id: ProductId) -> Result<bool> {
        let Some(product) = self.repository.find_by_id(product_id).await? else {
            return match self.store.get(product_id).await? {
                Some(record) => self.remove_orphan(product_id, record.source_version).await,
                None => Err(Error::product_not_found(product_id)),
            };
        };
        let decision = self.on_change(product_id, product.version, true).await;
        info!(product_id = %product_id, version = product.version, "product re-sync requested");
        Ok(!matches!(decision, ChangeDecision::Ignored))
    }

    async fn resync_all(&self) -> Result<usize> {
        let products = self.repository.list().await?;
        let stored: HashMap<ProductId, u64> = self
            .store
            .scan()
            .await?
            .iter()
            .map(|record| (record.product_id, record.source_version))
            .collect();

        let mut touched = 0;
        for product in &products {
            let fresh = stored
                .get(&product.id)
                .is_some_and(|version| *version >= product.version);
            let degraded = self
                .entries
                .get(&product.id)
                .is_some_and(|entry| entry.degraded);
            if fresh && !degraded {
                continue;
            }
            if !matches!(
                self.on_change(product.id, product.version, true).await,
                ChangeDecision::Ignored
            ) {
                touched += 1;
            }
        }

        let live: HashSet<ProductId> = products.iter().map(|product| product.id).collect();
        for (product_id, version) in stored {
            if !live.contains(&product_id) && self.remove_orphan(product_id, version).await? {
                touched += 1;
            }
        }

        info!(
            products = products.len(),
            touched, "index reconciled with catalog"
        );
        Ok(touched)
    }

    async fn sync_status(&self, product_id: ProductId) -> Result<Option<SyncStatus>> {
        let stored_version = self.stored_version(product_id).await?;
        let entry = self.entries.get(&product_id).map(|entry| entry.value().clone());
        Ok(match entry {
            Some(entry) => Some(entry.status(product_id, stored_version)),
            None => stored_version.map(|version| {
                let entry = ProductSyncEntry {
                    target_version: version,
                    ..ProductSyncEntry::default()
                };
                entry.status(product_id, Some(version))
            }),
        })
    }

    async fn degraded_products(&self) -> Result<Vec<SyncStatus>> {
        let mut degraded: Vec<(ProductId, ProductSyncEntry)> = self
            .entries
            .iter()
            .filter(|entry| entry.degraded)
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        degraded.sort_by_key(|(product_id, _)| *product_id);

        let mut statuses = Vec::with_capacity(degraded.len());
        for (product_id, entry) in degraded {
            let stored_version = self.stored_version(product_id).await?;
            statuses.push(entry.status(product_id, stored_version));
        }
        Ok(statuses)
    }

    fn stats(&self) -> SyncStats {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        SyncStats {
            events_handled: load(&self.counters.events_handled),
            events_ignored: load(&self.counters.events_ignored),
            computations_started: load(&self.counters.computations_started),
            records_stored: load(&self.counters.records_stored),
            records_removed: load(&self.counters.records_removed),
            results_discarded: load(&self.counters.results_discarded),
            retries: load(&self.counters.retries),
            degraded: load(&self.counters.degraded),
            pending: self.pending(),
        }
    }
}

impl CatalogVersionView for SyncCoordinator {
    fn latest_version(&self, product_id: ProductId) -> Option<u64> {
        self.entries
            .get(&product_id)
            .map(|entry| entry.target_version)
    }
}

/// Handle to a running coordinator
pub struct SyncHandle {
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl SyncHandle {
    /// Whether any consumer or worker is still running
    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }

    /// Stop the consumer and workers and wait for them to exit
    ///
    /// In-flight computations finish first; queued tasks are dropped.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "sync task ended abnormally");
            }
        }
        info!("sync coordinator stopped");
    }
}
