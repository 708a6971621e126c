//! Semantic Embedding Value Objects
//!
//! Value objects representing semantic embeddings used for similarity
//! comparison between product texts and queries.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Value Object: Embedding Vector
///
/// Ordered sequence of `f32` components with a fixed dimension. The
/// components are shared behind an `Arc<[f32]>`, so clones are cheap and no
/// holder can mutate them: an update always replaces the whole vector.
///
/// ## Business Rules
///
/// - At least one component
/// - Every component is finite
/// - Normalized vectors have unit L2 norm (zero vectors cannot be normalized)
///
/// ## Example
///
/// ```rust
/// use catalog_domain::value_objects::EmbeddingVector;
///
/// let v = EmbeddingVector::normalized(vec![3.0, 4.0]).unwrap();
/// assert_eq!(v.dimensions(), 2);
/// assert!((v.norm() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct EmbeddingVector {
    components: Arc<[f32]>,
}

impl EmbeddingVector {
    /// Build a vector after checking it is non-empty and finite
    pub fn new(components: Vec<f32>) -> Result<Self> {
        if components.is_empty() {
            return Err(Error::invalid_argument("embedding vector must not be empty"));
        }
        if let Some(position) = components.iter().position(|c| !c.is_finite()) {
            return Err(Error::invalid_argument(format!(
                "embedding component {position} is not finite"
            )));
        }
        Ok(Self {
            components: components.into(),
        })
    }

    /// Build an L2-normalized vector
    pub fn normalized(mut components: Vec<f32>) -> Result<Self> {
        let norm = l2_norm(&components);
        if !norm.is_finite() {
            return Err(Error::invalid_argument("embedding norm is not finite"));
        }
        if norm == 0.0 {
            return Err(Error::invalid_argument(
                "embedding vector has zero norm and cannot be normalized",
            ));
        }
        for c in &mut components {
            *c /= norm;
        }
        Self::new(components)
    }

    /// Normalized copy of this vector
    pub fn to_normalized(&self) -> Result<Self> {
        Self::normalized(self.components.to_vec())
    }

    /// Number of components
    pub fn dimensions(&self) -> usize {
        self.components.len()
    }

    /// Borrow the components
    pub fn as_slice(&self) -> &[f32] {
        &self.components
    }

    /// L2 norm
    pub fn norm(&self) -> f32 {
        l2_norm(&self.components)
    }

    /// Dot product with another vector of the same dimension
    ///
    /// Returns `None` when the dimensions differ.
    pub fn dot(&self, other: &EmbeddingVector) -> Option<f32> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        Some(
            self.components
                .iter()
                .zip(other.components.iter())
                .map(|(a, b)| a * b)
                .sum(),
        )
    }

    /// Cosine similarity in `[-1, 1]`, `None` on dimension mismatch
    pub fn cosine_similarity(&self, other: &EmbeddingVector) -> Option<f32> {
        let dot = self.dot(other)?;
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return Some(0.0);
        }
        Some((dot / denom).clamp(-1.0, 1.0))
    }
}

impl TryFrom<Vec<f32>> for EmbeddingVector {
    type Error = Error;

    fn try_from(components: Vec<f32>) -> Result<Self> {
        Self::new(components)
    }
}

impl From<EmbeddingVector> for Vec<f32> {
    fn from(vector: EmbeddingVector) -> Self {
        vector.components.to_vec()
    }
}

fn l2_norm(components: &[f32]) -> f32 {
    components.iter().map(|c| c * c).sum::<f32>().sqrt()
}
