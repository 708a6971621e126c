//! Main application configuration

use serde::{Deserialize, Serialize};

use super::event_bus::EventBusConfig;
use super::logging::LoggingConfig;
use super::providers::ProvidersConfig;
use super::search::SearchConfig;
use super::sync::SyncConfig;

/// Root configuration
///
/// ```toml
/// [logging]
/// level = "info"
///
/// [providers.embedding]
/// provider = "ollama"
/// model = "all-minilm"
///
/// [providers.vector_store]
/// provider = "memory"
///
/// [event_bus]
/// provider = "tokio"
///
/// [sync]
/// workers = 4
///
/// [search]
/// default_k = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Embedding and vector store providers
    pub providers: ProvidersConfig,
    /// Event bus
    pub event_bus: EventBusConfig,
    /// Synchronization coordinator
    pub sync: SyncConfig,
    /// Query limits
    pub search: SearchConfig,
}
