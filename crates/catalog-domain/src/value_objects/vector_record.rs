//! Vector Record Value Objects
//!
//! A vector record pairs a product's embedding with the catalog version
//! that produced it. The version is what makes out-of-order delivery safe:
//! a store only ever moves a record forward.

use crate::entities::{Product, ProductId};
use crate::value_objects::EmbeddingVector;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product attributes captured when the embedding was computed
///
/// Search filters run against this snapshot so ranking never needs a
/// round trip to the relational store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Unit price
    pub price: f64,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
        }
    }
}

/// Value Object: Vector Record
///
/// ## Business Rules
///
/// - One record per product at most
/// - `source_version` equals the catalog version whose text was embedded
/// - A record is stale when `source_version` lags the product's current version
/// - Records are replaced wholesale, never merged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Product the embedding belongs to
    pub product_id: ProductId,
    /// Normalized embedding
    pub vector: EmbeddingVector,
    /// Catalog version that produced the embedding
    pub source_version: u64,
    /// When the embedding was computed
    pub computed_at: DateTime<Utc>,
    /// Product attributes at `source_version`
    pub snapshot: ProductSnapshot,
}

impl VectorRecord {
    /// Build a record for a product at its current version
    pub fn for_product(product: &Product, vector: EmbeddingVector) -> Self {
        Self {
            product_id: product.id,
            vector,
            source_version: product.version,
            computed_at: Utc::now(),
            snapshot: ProductSnapshot::from(product),
        }
    }

    /// How many versions this record lags behind `current_version`
    pub fn staleness(&self, current_version: u64) -> u64 {
        current_version.saturating_sub(self.source_version)
    }

    /// Whether the record lags behind `current_version`
    pub fn is_stale(&self, current_version: u64) -> bool {
        self.staleness(current_version) > 0
    }
}

/// Result of a version-gated `put`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum PutOutcome {
    /// No record existed for the product
    Inserted,
    /// An older record was replaced
    Replaced {
        /// Version of the record that was replaced
        previous_version: u64,
    },
    /// The stored record was at the same or a newer version; nothing changed
    Discarded {
        /// Version that remains stored
        current_version: u64,
    },
}

impl PutOutcome {
    /// Whether the store now holds the submitted record
    pub fn is_applied(self) -> bool {
        !matches!(self, Self::Discarded { .. })
    }
}
