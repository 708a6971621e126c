//! Search configuration types

use catalog_application::use_cases::SearchLimits;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SEARCH_K, DEFAULT_SEARCH_MAX_K};

/// Query limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned when the caller passes no `k`
    pub default_k: usize,
    /// Largest `k` served; larger requests are clamped
    pub max_k: usize,
    /// Exclude records more than this many versions behind the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_staleness: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: DEFAULT_SEARCH_K,
            max_k: DEFAULT_SEARCH_MAX_K,
            max_staleness: None,
        }
    }
}

impl SearchConfig {
    /// Limits enforced by the catalog service
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            default_k: self.default_k,
            max_k: self.max_k,
            max_staleness: self.max_staleness,
        }
    }
}
