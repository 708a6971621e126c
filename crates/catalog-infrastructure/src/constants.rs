//! Infrastructure constants
//!
//! Defaults shared by the configuration types, the loader and logging.

// ============================================================================
// Configuration files
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "catalog.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "catalog";

/// Environment variable prefix; nested keys are separated by `__`
pub const CONFIG_ENV_PREFIX: &str = "CATALOG";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// Logging
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CATALOG_LOG";

/// File name prefix used when the configured log path has no stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "catalog";

// ============================================================================
// Providers
// ============================================================================

/// Embedding provider used when none is configured
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "null";

/// Vector record store used when none is configured
pub const DEFAULT_VECTOR_STORE_PROVIDER: &str = "memory";

/// Buffer of the in-process event bus
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 1024;

/// Default NATS server
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Default NATS subject for catalog events
pub const DEFAULT_NATS_SUBJECT: &str = "catalog.events";

// ============================================================================
// Synchronization
// ============================================================================

/// Embedding workers
pub const DEFAULT_SYNC_WORKERS: usize = 4;

/// Task queue capacity
pub const DEFAULT_SYNC_QUEUE_CAPACITY: usize = 1024;

/// Retries before a product is marked degraded
pub const DEFAULT_SYNC_MAX_RETRIES: u32 = 5;

/// First backoff ceiling in milliseconds
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 200;

/// Backoff cap in milliseconds
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 30_000;

/// Upper bound for one embedding call in milliseconds
pub const DEFAULT_EMBEDDING_TIMEOUT_MS: u64 = 10_000;

/// Texts per embedding call
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;

/// How long shutdown waits for in-flight work
pub const SHUTDOWN_DRAIN_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Search
// ============================================================================

/// Results returned when the caller passes no `k`
pub const DEFAULT_SEARCH_K: usize = 10;

/// Largest `k` served
pub const DEFAULT_SEARCH_MAX_K: usize = 100;
