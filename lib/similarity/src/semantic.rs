//! Semantic text similarity
//!
//! The scenario criterion compares two free-text descriptions. The engine
//! only depends on the [`TextSimilarity`] capability, so tests can use a
//! deterministic stub and deployments can swap the embedding backend.

use crate::distance::cosine_similarity;
use crate::embedder::{CachedEmbedder, Embedder, HashEmbedder};
use crate::{EmbedError, ScoringError};
use chainmatch_core::Criterion;

/// Bounded similarity between two texts
pub trait TextSimilarity: Send + Sync {
    /// Similarity in [0, 1], or an error when it cannot be computed
    fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError>;
}

impl<T: TextSimilarity + ?Sized> TextSimilarity for &T {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        (**self).similarity(a, b)
    }
}

impl<T: TextSimilarity + ?Sized> TextSimilarity for std::sync::Arc<T> {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        (**self).similarity(a, b)
    }
}

impl<T: TextSimilarity + ?Sized> TextSimilarity for Box<T> {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        (**self).similarity(a, b)
    }
}

/// Cosine similarity of two embeddings, clamped to [0, 1]
#[derive(Debug)]
pub struct EmbeddingSimilarity<E> {
    embedder: E,
}

impl<E: Embedder> EmbeddingSimilarity<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl EmbeddingSimilarity<CachedEmbedder<HashEmbedder>> {
    /// Offline default: cached hash embeddings
    pub fn hashed() -> Self {
        Self::new(CachedEmbedder::new(HashEmbedder::default()))
    }
}

impl<E: Embedder> TextSimilarity for EmbeddingSimilarity<E> {
    fn similarity(&self, a: &str, b: &str) -> Result<f64, ScoringError> {
        let va = self.embedder.embed(a)?;
        let vb = self.embedder.embed(b)?;
        if va.len() != vb.len() {
            return Err(EmbedError::DimensionMismatch {
                expected: va.len(),
                actual: vb.len(),
            }
            .into());
        }

        let cosine = cosine_similarity(&va, &vb);
        if cosine.is_nan() {
            return Err(ScoringError::OutOfRange {
                criterion: Criterion::Scenario,
                value: cosine,
            });
        }
        Ok(cosine.clamp(0.0, 1.0))
    }
}

/// Scenario similarity that degrades to 0 instead of failing
///
/// A single broken case text must not raise; the failure is logged and
/// scored as no similarity.
pub fn scenario_similarity<S: TextSimilarity + ?Sized>(text: &S, a: &str, b: &str) -> f64 {
    match text.similarity(a, b) {
        Ok(score) => score,
        Err(err) => {
            tracing::warn!(error = %err, "scenario similarity failed, scoring as 0");
            0.0
        }
    }
}
