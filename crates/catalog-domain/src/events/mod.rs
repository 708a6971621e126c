//! Domain Events
//!
//! Immutable facts about the catalog and about the index that other parts
//! of the system react to.
//!
//! | Event | Description |
//! |-------|-------------|
//! | [`DomainEvent`] | Catalog mutations and index notifications |

/// Domain event definitions
pub mod domain_events;

pub use domain_events::DomainEvent;
