//! Search-Related Value Objects
//!
//! Value objects describing similarity queries and their ranked results.

use crate::entities::ProductId;
use crate::value_objects::VectorRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Value Object: Ranked Search Result
///
/// Ephemeral; recomputed for every query and never persisted.
///
/// ## Business Rules
///
/// - `score` is cosine similarity in `[-1, 1]` (higher is better)
/// - `rank` is the 1-based position in the result list
/// - Equal scores are ordered by ascending product id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched product
    pub product_id: ProductId,
    /// Similarity score
    pub score: f32,
    /// 1-based position
    pub rank: usize,
    /// Catalog version the matched embedding was computed from
    pub source_version: u64,
    /// Product name at `source_version`
    pub name: String,
}

/// Eligibility predicate applied before ranking
///
/// Every populated criterion must match. An empty filter admits every record.
///
/// ## Example
///
/// ```rust
/// use catalog_domain::value_objects::ProductFilter;
///
/// let filter = ProductFilter::new().with_price_range(Some(5.0), Some(20.0));
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Inclusive lower price bound
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Case-insensitive substring the product name must contain
    #[serde(default)]
    pub name_contains: Option<String>,
    /// Restrict results to these products
    #[serde(default)]
    pub product_ids: Option<BTreeSet<ProductId>>,
}

impl ProductFilter {
    /// Empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to an inclusive price range
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Require the name to contain `needle`
    pub fn with_name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    /// Restrict to an explicit set of products
    pub fn with_product_ids(mut self, ids: impl IntoIterator<Item = ProductId>) -> Self {
        self.product_ids = Some(ids.into_iter().collect());
        self
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.name_contains.is_none()
            && self.product_ids.is_none()
    }

    /// Evaluate the filter against a record snapshot
    pub fn matches(&self, record: &VectorRecord) -> bool {
        let price = record.snapshot.price;
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        if let Some(needle) = &self.name_contains {
            let name = record.snapshot.name.to_lowercase();
            if !name.contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(ids) = &self.product_ids {
            if !ids.contains(&record.product_id) {
                return false;
            }
        }
        true
    }
}

/// Options accepted by similarity queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Pre-ranking filter
    #[serde(default)]
    pub filter: Option<ProductFilter>,
    /// Exclude records lagging the latest known version by more than this
    /// many versions. `None` includes stale records.
    #[serde(default)]
    pub max_staleness: Option<u64>,
}

impl SearchOptions {
    /// Options with no filter and no staleness bound
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a filter
    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Bound staleness
    pub fn with_max_staleness(mut self, max_staleness: u64) -> Self {
        self.max_staleness = Some(max_staleness);
        self
    }
}

/// How a text query was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Embedding similarity
    Semantic,
    /// Keyword overlap, used while the embedding generator is unavailable
    Lexical,
}

/// Results of a text query together with the mode that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Mode that served the query
    pub mode: SearchMode,
    /// Ranked results
    pub results: Vec<SearchResult>,
}
