//! Configuration types module

pub mod app;
pub mod event_bus;
pub mod logging;
pub mod providers;
pub mod search;
pub mod sync;

// Re-export main types
pub use app::AppConfig;
pub use event_bus::{EventBusConfig, EventBusKind};
pub use logging::LoggingConfig;
pub use providers::{EmbeddingConfig, ProvidersConfig, VectorStoreConfig};
pub use search::SearchConfig;
pub use sync::SyncConfig;
