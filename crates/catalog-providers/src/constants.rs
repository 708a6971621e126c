//! Provider Constants
//!
//! Constants specific to provider implementations. Domain rules live in
//! `catalog-domain`, tunable defaults in the infrastructure configuration.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// Null embedding provider default dimension
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

/// Ollama all-minilm dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MINILM: usize = 384;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama mxbai-embed-large dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MXBAI: usize = 1024;

/// Ollama dimension for unknown models
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

// ============================================================================
// EMBEDDING API CONSTANTS
// ============================================================================

/// Ollama server default URL
pub const OLLAMA_DEFAULT_URL: &str = "http://localhost:11434";

/// Ollama default embedding model
pub const OLLAMA_DEFAULT_MODEL: &str = "all-minilm";

/// OpenAI API default base URL
pub const OPENAI_DEFAULT_URL: &str = "https://api.openai.com/v1";

/// OpenAI default embedding model
pub const OPENAI_DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Transport timeout used when none is configured (seconds)
pub const EMBEDDING_HTTP_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// JSON content type header value
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Error message prefix for request timeouts
pub const ERROR_MSG_REQUEST_TIMEOUT: &str = "Request timed out after";

// ============================================================================
// EVENT BUS CONSTANTS
// ============================================================================

/// Default tokio broadcast channel capacity
pub const EVENT_BUS_DEFAULT_CAPACITY: usize = 1024;

/// Default NATS subject for catalog events
pub const NATS_DEFAULT_SUBJECT: &str = "catalog.events";
