//! Configuration
//!
//! Typed sections in [`types`], loaded and validated by [`loader`].

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
