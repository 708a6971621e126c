//! Catalog product entity
//!
//! The relational store owns products. The index only observes them through
//! events and read-through queries, so these types carry exactly what the
//! index needs: identity, the text that gets embedded, the price used by
//! search filters and the catalog version counter.

use crate::constants::PRODUCT_TEXT_SEPARATOR;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, immutable product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw identifier
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Entity: Catalog Product
///
/// ## Business Rules
///
/// - `id` never changes once assigned
/// - `version` is incremented by the relational store on every mutation
/// - The embedded text is the name followed by the description
///
/// ## Example
///
/// ```rust
/// use catalog_domain::entities::{Product, ProductId};
///
/// let product = Product {
///     id: ProductId::new(42),
///     name: "Red mug".to_string(),
///     description: "Stoneware, 350ml".to_string(),
///     price: 12.5,
///     version: 1,
/// };
/// assert_eq!(product.embedding_text(), "Red mug Stoneware, 350ml");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Catalog version counter
    pub version: u64,
}

impl Product {
    /// Text fed to the embedding generator for this product
    pub fn embedding_text(&self) -> String {
        let name = self.name.trim();
        let description = self.description.trim();
        if description.is_empty() {
            name.to_string()
        } else {
            format!("{name}{PRODUCT_TEXT_SEPARATOR}{description}")
        }
    }
}

/// Write model for creating or replacing a product
///
/// The relational store assigns the version; callers only provide the
/// identifier and the mutable attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Identifier of the product to create or replace
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: f64,
}

impl ProductDraft {
    /// Create a draft
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Reject drafts the catalog would never accept
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_argument("product name must not be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::invalid_argument(format!(
                "product price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Materialize the draft at the given catalog version
    pub fn into_product(self, version: u64) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            version,
        }
    }
}
