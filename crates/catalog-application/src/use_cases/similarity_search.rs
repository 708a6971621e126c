//! Similarity Search Use Case
//!
//! Exact top-k ranking over a point-in-time snapshot of the vector record
//! store. A bounded min-heap keeps the `k` best candidates so a query costs
//! `O(n log k)` regardless of catalog size.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};
use std::sync::Arc;

use async_trait::async_trait;
use catalog_domain::constants::{SIMILARITY_SCORE_MAX, SIMILARITY_SCORE_MIN};
use catalog_domain::entities::ProductId;
use catalog_domain::error::{Error, Result};
use catalog_domain::value_objects::{EmbeddingVector, SearchOptions, SearchResult, VectorRecord};
use tracing::debug;

use crate::domain_services::{CatalogVersionView, SearchEngineInterface};
use crate::ports::VectorRecordStore;

/// Similarity search over the vector record store
pub struct SimilaritySearchEngine {
    store: Arc<dyn VectorRecordStore>,
    versions: Option<Arc<dyn CatalogVersionView>>,
}

impl SimilaritySearchEngine {
    /// Create an engine reading from `store`
    pub fn new(store: Arc<dyn VectorRecordStore>) -> Self {
        Self {
            store,
            versions: None,
        }
    }

    /// Judge staleness against the versions known to `versions`
    ///
    /// Without a view every record counts as fresh.
    #[must_use]
    pub fn with_version_view(mut self, versions: Arc<dyn CatalogVersionView>) -> Self {
        self.versions = Some(versions);
        self
    }

    fn is_eligible(&self, record: &VectorRecord, options: &SearchOptions) -> bool {
        if let Some(filter) = &options.filter {
            if !filter.matches(record) {
                return false;
            }
        }
        match (options.max_staleness, &self.versions) {
            (Some(max_staleness), Some(versions)) => {
                let latest = versions
                    .latest_version(record.product_id)
                    .unwrap_or(record.source_version);
                record.staleness(latest) <= max_staleness
            }
            _ => true,
        }
    }
}

#[async_trait]
impl SearchEngineInterface for SimilaritySearchEngine {
    async fn search(
        &self,
        query: &EmbeddingVector,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        ensure_positive(k)?;
        let query = query.to_normalized()?;
        let snapshot = self.store.scan().await?;

        let mut top = TopK::new(k);
        let mut skipped_dimensions = 0usize;
        for (index, record) in snapshot.iter().enumerate() {
            if !self.is_eligible(record, options) {
                continue;
            }
            // Records are stored unit-length, so the dot product is the cosine
            let Some(dot) = record.vector.dot(&query) else {
                skipped_dimensions += 1;
                continue;
            };
            top.offer(ScoredCandidate {
                score: dot.clamp(SIMILARITY_SCORE_MIN, SIMILARITY_SCORE_MAX),
                product_id: record.product_id,
                index,
            });
        }
        if skipped_dimensions > 0 {
            debug!(
                skipped = skipped_dimensions,
                query_dimensions = query.dimensions(),
                "records with a different dimension were skipped"
            );
        }

        Ok(top.into_results(&snapshot))
    }

    async fn lexical_search(
        &self,
        text: &str,
        k: usize,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        ensure_positive(k)?;
        let query_tokens = tokenize(text);
        if query_tokens.is_empty() {
            return Err(Error::invalid_argument(
                "query must contain at least one word",
            ));
        }
        let snapshot = self.store.scan().await?;

        let mut top = TopK::new(k);
        for (index, record) in snapshot.iter().enumerate() {
            if !self.is_eligible(record, options) {
                continue;
            }
            let record_tokens = tokenize(&format!(
                "{} {}",
                record.snapshot.name, record.snapshot.description
            ));
            let matched = query_tokens.intersection(&record_tokens).count();
            if matched == 0 {
                continue;
            }
            top.offer(ScoredCandidate {
                score: matched as f32 / query_tokens.len() as f32,
                product_id: record.product_id,
                index,
            });
        }

        Ok(top.into_results(&snapshot))
    }
}

fn ensure_positive(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::invalid_argument("k must be greater than zero"));
    }
    Ok(())
}

fn tokenize(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Candidate ordered so that the heap top is the worst one kept
#[derive(Debug, Clone, Copy)]
struct ScoredCandidate {
    score: f32,
    product_id: ProductId,
    index: usize,
}

impl Ord for ScoredCandidate {
    // Better candidates compare as Less: higher score, then lower product id
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.product_id.cmp(&other.product_id))
    }
}

impl PartialOrd for ScoredCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ScoredCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredCandidate {}

struct TopK {
    k: usize,
    heap: BinaryHeap<ScoredCandidate>,
}

impl TopK {
    fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
        }
    }

    fn offer(&mut self, candidate: ScoredCandidate) {
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if self.heap.peek().is_some_and(|worst| candidate < *worst) {
            self.heap.pop();
            self.heap.push(candidate);
        }
    }

    fn into_results(self, snapshot: &[Arc<VectorRecord>]) -> Vec<SearchResult> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .enumerate()
            .map(|(position, candidate)| {
                let record = &snapshot[candidate.index];
                SearchResult {
                    product_id: record.product_id,
                    score: candidate.score,
                    rank: position + 1,
                    source_version: record.source_version,
                    name: record.snapshot.name.clone(),
                }
            })
            .collect()
    }
}
