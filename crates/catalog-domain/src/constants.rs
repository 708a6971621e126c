//! Domain layer constants
//!
//! Values that are part of the domain rules themselves. Tunable operational
//! defaults live with the configuration types in the infrastructure crate.

// ============================================================================
// EMBEDDING DOMAIN CONSTANTS
// ============================================================================

/// Dimension produced by the `all-minilm` family of embedding models
pub const EMBEDDING_DIMENSION_MINILM: usize = 384;

/// Separator placed between product name and description when building
/// the text that is embedded
pub const PRODUCT_TEXT_SEPARATOR: &str = " ";

// ============================================================================
// SEARCH DOMAIN CONSTANTS
// ============================================================================

/// Lower bound of the similarity score range
pub const SIMILARITY_SCORE_MIN: f32 = -1.0;

/// Upper bound of the similarity score range
pub const SIMILARITY_SCORE_MAX: f32 = 1.0;

// ============================================================================
// CATALOG DOMAIN CONSTANTS
// ============================================================================

/// Version assigned to a product on its first write
pub const INITIAL_PRODUCT_VERSION: u64 = 1;
