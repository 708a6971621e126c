//! Composition root
//!
//! Turns an [`AppConfig`](crate::config::AppConfig) into a wired
//! [`AppContext`]: providers come from the linkme registries, the event bus
//! from its config section, and the use cases are assembled on top.

pub mod bootstrap;
pub mod provider_resolvers;

pub use bootstrap::{AppContext, init_app, init_test_app};
pub use provider_resolvers::{create_event_bus, resolve_embedding, resolve_vector_store};
