//! Domain Entities
//!
//! Entities have identity that outlives changes to their attributes.
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Product`] | A catalog item as stored in the relational source of truth |
//! | [`ProductDraft`] | Write model used to create or update a product |

/// Catalog product entity
pub mod product;

pub use product::{Product, ProductDraft, ProductId};
