//! Repository Interfaces
//!
//! | Repository | Description |
//! |------------|-------------|
//! | [`ProductRepository`] | Relational source of truth for products and versions |

/// Product repository interface
pub mod product_repository;

pub use product_repository::ProductRepository;
