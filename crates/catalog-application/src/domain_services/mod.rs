//! Application Service Interfaces
//!
//! Contracts implemented by the use cases in [`crate::use_cases`]. Outer
//! layers hold services as `Arc<dyn ...Interface>` so tests and alternative
//! compositions can swap implementations.

/// Catalog facade interface
pub mod catalog;
/// Similarity search interface
pub mod search;
/// Synchronization interface
pub mod sync;

pub use catalog::CatalogServiceInterface;
pub use search::SearchEngineInterface;
pub use sync::{CatalogVersionView, SyncCoordinatorInterface, SyncStats};
