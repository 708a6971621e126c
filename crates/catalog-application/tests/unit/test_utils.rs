//! Shared fixtures: a controllable embedding provider and a fully wired
//! engine over the in-memory providers.

// Force-link catalog-providers so linkme registrations are included
extern crate catalog_providers;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use catalog_application::domain_services::{
    CatalogVersionView, SearchEngineInterface, SyncCoordinatorInterface,
};
use catalog_application::ports::{EmbeddingProvider, VectorRecordStore};
use catalog_application::use_cases::{
    CatalogService, EmbeddingPipeline, EmbeddingPipelineConfig, RetryPolicy, SearchLimits,
    SimilaritySearchEngine, SyncCoordinator, SyncCoordinatorConfig, SyncHandle,
};
use catalog_domain::entities::{Product, ProductDraft, ProductId};
use catalog_domain::error::{Error, Result};
use catalog_domain::value_objects::{EmbeddingVector, SyncStatus, VectorRecord};
use catalog_providers::embedding::NullEmbeddingProvider;
use catalog_providers::events::TokioEventBusProvider;
use catalog_providers::repository::InMemoryProductRepository;
use catalog_providers::vector_store::InMemoryVectorRecordStore;
use tokio::sync::Semaphore;

pub const DIMENSIONS: usize = 64;
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Token-hashing provider that can be paused or made to fail
pub struct ControlledEmbeddingProvider {
    inner: NullEmbeddingProvider,
    calls: AtomicUsize,
    waiting: AtomicUsize,
    gated: AtomicBool,
    failing: AtomicBool,
    gate: Semaphore,
}

impl ControlledEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            inner: NullEmbeddingProvider::with_dimensions(dimensions),
            calls: AtomicUsize::new(0),
            waiting: AtomicUsize::new(0),
            gated: AtomicBool::new(false),
            failing: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }

    /// Generator calls so far, including ones still blocked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls currently blocked on the gate
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Block every following call until [`Self::open`]
    pub fn close(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    /// Release blocked calls and stop blocking
    pub fn open(&self) {
        self.gated.store(false, Ordering::SeqCst);
        self.gate.add_permits(1024);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn vector_for(&self, text: &str) -> EmbeddingVector {
        EmbeddingVector::normalized(self.inner.hash_text(text)).unwrap()
    }
}

#[async_trait]
impl EmbeddingProvider for ControlledEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated.load(Ordering::SeqCst) {
            self.waiting.fetch_add(1, Ordering::SeqCst);
            let permit = self.gate.acquire().await;
            self.waiting.fetch_sub(1, Ordering::SeqCst);
            permit
                .map_err(|e| Error::internal(e.to_string()))?
                .forget();
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::embedding_unavailable("generator offline"));
        }
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn provider_name(&self) -> &str {
        "controlled"
    }

    fn model(&self) -> &str {
        "token-hash"
    }
}

/// Retry policy short enough for tests
pub fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(
        max_retries,
        Duration::from_millis(1),
        Duration::from_millis(4),
    )
}

pub struct HarnessOptions {
    pub workers: usize,
    pub retry: RetryPolicy,
    pub limits: SearchLimits,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            workers: 2,
            retry: fast_retry(3),
            limits: SearchLimits::default(),
        }
    }
}

/// Engine wired over in-memory providers with the sync coordinator running
pub struct Harness {
    pub repository: Arc<InMemoryProductRepository>,
    pub store: Arc<InMemoryVectorRecordStore>,
    pub bus: Arc<TokioEventBusProvider>,
    pub provider: Arc<ControlledEmbeddingProvider>,
    pub pipeline: Arc<EmbeddingPipeline>,
    pub coordinator: Arc<SyncCoordinator>,
    pub catalog: CatalogService,
    handle: Option<SyncHandle>,
}

impl Harness {
    pub async fn start() -> Self {
        Self::start_with(HarnessOptions::default()).await
    }

    pub async fn start_with(options: HarnessOptions) -> Self {
        let repository = Arc::new(InMemoryProductRepository::new());
        let store = Arc::new(InMemoryVectorRecordStore::with_dimensions(DIMENSIONS));
        let bus = Arc::new(TokioEventBusProvider::new());
        let provider = Arc::new(ControlledEmbeddingProvider::new(DIMENSIONS));
        let pipeline = Arc::new(EmbeddingPipeline::new(
            provider.clone(),
            EmbeddingPipelineConfig {
                dimensions: Some(DIMENSIONS),
                timeout: WAIT_TIMEOUT,
                batch_size: 8,
            },
        ));
        let coordinator = Arc::new(SyncCoordinator::new(
            repository.clone(),
            pipeline.clone(),
            store.clone(),
            bus.clone(),
            SyncCoordinatorConfig {
                workers: options.workers,
                queue_capacity: 64,
                retry: options.retry,
            },
        ));
        let versions: Arc<dyn CatalogVersionView> = coordinator.clone();
        let search: Arc<dyn SearchEngineInterface> =
            Arc::new(SimilaritySearchEngine::new(store.clone()).with_version_view(versions));
        let catalog = CatalogService::new(
            repository.clone(),
            bus.clone(),
            pipeline.clone(),
            search,
            coordinator.clone(),
            store.clone(),
            options.limits,
        );
        let handle = coordinator.start().await.unwrap();

        Self {
            repository,
            store,
            bus,
            provider,
            pipeline,
            coordinator,
            catalog,
            handle: Some(handle),
        }
    }

    pub async fn idle(&self) {
        assert!(
            self.coordinator.wait_until_idle(WAIT_TIMEOUT).await,
            "sync coordinator did not go idle"
        );
    }

    pub async fn status(&self, id: i64) -> SyncStatus {
        self.coordinator
            .sync_status(ProductId::new(id))
            .await
            .unwrap()
            .expect("product is known to the coordinator")
    }

    /// Poll until the coordinator has seen `version` of the product
    pub async fn wait_for_target(&self, id: i64, version: u64) {
        let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
        loop {
            let status = self.coordinator.sync_status(ProductId::new(id)).await.unwrap();
            if status.is_some_and(|status| status.target_version >= version) {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "version {version} of product {id} never reached the coordinator"
            );
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    pub async fn record(&self, id: i64) -> Option<Arc<VectorRecord>> {
        self.store.get(ProductId::new(id)).await.unwrap()
    }

    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown().await;
        }
    }

    pub fn take_handle(&mut self) -> SyncHandle {
        self.handle.take().expect("coordinator is running")
    }
}

/// Poll a synchronous condition until it holds or the wait times out
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + WAIT_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    condition()
}

pub fn draft(id: i64, name: &str, description: &str, price: f64) -> ProductDraft {
    ProductDraft::new(id, name, description, price)
}

pub fn product(id: i64, name: &str, description: &str, price: f64, version: u64) -> Product {
    draft(id, name, description, price).into_product(version)
}
