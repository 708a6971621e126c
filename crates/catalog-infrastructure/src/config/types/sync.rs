//! Synchronization configuration types

use std::time::Duration;

use catalog_application::use_cases::{
    EmbeddingPipelineConfig, RetryPolicy, SyncCoordinatorConfig,
};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_MAX_MS, DEFAULT_EMBEDDING_BATCH_SIZE,
    DEFAULT_EMBEDDING_TIMEOUT_MS, DEFAULT_SYNC_MAX_RETRIES, DEFAULT_SYNC_QUEUE_CAPACITY,
    DEFAULT_SYNC_WORKERS,
};

/// Synchronization coordinator and embedding pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Embedding workers
    pub workers: usize,
    /// Capacity of the task queue
    pub queue_capacity: usize,
    /// Retries before a product is marked degraded
    pub max_retries: u32,
    /// First backoff ceiling in milliseconds
    pub backoff_base_ms: u64,
    /// Backoff cap in milliseconds
    pub backoff_max_ms: u64,
    /// Upper bound for one embedding call in milliseconds
    pub embedding_timeout_ms: u64,
    /// Texts per embedding call
    pub batch_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_SYNC_WORKERS,
            queue_capacity: DEFAULT_SYNC_QUEUE_CAPACITY,
            max_retries: DEFAULT_SYNC_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            backoff_max_ms: DEFAULT_BACKOFF_MAX_MS,
            embedding_timeout_ms: DEFAULT_EMBEDDING_TIMEOUT_MS,
            batch_size: DEFAULT_EMBEDDING_BATCH_SIZE,
        }
    }
}

impl SyncConfig {
    /// Embedding call timeout
    pub fn embedding_timeout(&self) -> Duration {
        Duration::from_millis(self.embedding_timeout_ms)
    }

    /// Retry policy for failed computations
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_millis(self.backoff_base_ms),
            Duration::from_millis(self.backoff_max_ms),
        )
    }

    /// Coordinator settings
    pub fn coordinator_config(&self) -> SyncCoordinatorConfig {
        SyncCoordinatorConfig {
            workers: self.workers,
            queue_capacity: self.queue_capacity,
            retry: self.retry_policy(),
        }
    }

    /// Pipeline settings for a generator of `dimensions`
    pub fn pipeline_config(&self, dimensions: Option<usize>) -> EmbeddingPipelineConfig {
        EmbeddingPipelineConfig {
            dimensions,
            timeout: self.embedding_timeout(),
            batch_size: self.batch_size,
        }
    }
}
