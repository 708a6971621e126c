use async_trait::async_trait;
use catalog_domain::error::Result;
use catalog_domain::value_objects::{EmbeddingVector, SearchOptions, SearchResult};

/// Similarity Search Interface
///
/// Ranks the current vector records against a query. Implementations read
/// a point-in-time snapshot and never block writers.
#[async_trait]
pub trait SearchEngineInterface: Send + Sync {
    /// Top-`k` records by cosine similarity to `query`
    ///
    /// Results are ordered by descending score with ties broken by
    /// ascending product id. Fails with `InvalidArgument` when `k` is zero
    /// or `query` cannot be normalized.
    async fn search(
        &self,
        query: &EmbeddingVector,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>>;

    /// Top-`k` records by keyword overlap with `text`
    ///
    /// Used while the embedding generator is unavailable. Only records
    /// sharing at least one token with the query are returned.
    async fn lexical_search(
        &self,
        text: &str,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>>;
}
