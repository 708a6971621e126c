//! Synchronization Coordinator
//!
//! Keeps the vector record store converging on the relational catalog.
//!
//! - [`coordinator`] - event handling, worker pool, per-product state machine
//! - [`retry`] - exponential backoff with full jitter
//! - [`state`] - per-product bookkeeping

pub mod coordinator;
pub mod retry;
mod state;

pub use coordinator::{SyncCoordinator, SyncCoordinatorConfig, SyncHandle};
pub use retry::RetryPolicy;
