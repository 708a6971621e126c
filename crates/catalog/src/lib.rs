//! # Catalog Semantic Index
//!
//! Keeps a vector embedding for every product of a relational catalog and
//! serves nearest-neighbour search over them. Catalog writes never wait for
//! the embedding generator: a synchronization coordinator listens to
//! change events and converges the index in the background, deduplicating
//! bursts, retrying transient failures and never letting an older
//! computation overwrite a newer one.
//!
//! ## Example
//!
//! ```ignore
//! use catalog::infrastructure::{AppConfig, init_app};
//! use catalog::domain::{ProductDraft, value_objects::SearchOptions};
//!
//! let context = init_app(AppConfig::default()).await?;
//! let sync = context.start_sync().await?;
//! let catalog = context.catalog();
//!
//! catalog.upsert_product(ProductDraft::new(42_i64, "Blue ceramic mug", "", 9.5)).await?;
//! let hits = catalog.semantic_search("blue mug", Some(5), SearchOptions::new()).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - entities, value objects, events, errors and port traits
//! - `application` - embedding pipeline, search engine, sync coordinator, catalog facade
//! - `providers` - embedding generators, stores and event buses
//! - `infrastructure` - configuration, logging and the composition root

/// Domain layer - core types and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use catalog_domain::*;
}

/// Application layer - use cases and service interfaces
pub mod application {
    pub use catalog_application::*;
}

/// Provider implementations
pub mod providers {
    pub use catalog_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
pub mod infrastructure {
    pub use catalog_infrastructure::*;
}

mod init;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::CatalogServiceInterface;
pub use infrastructure::{AppConfig, AppContext, init_app};
pub use init::run;
