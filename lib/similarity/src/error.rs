use chainmatch_core::Criterion;
use thiserror::Error;

/// Failure of an embedding backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedding backend error: {0}")]
    Backend(String),
}

/// Failure while scoring one reference case
///
/// Scoring errors are isolated per case: the ranker records them and
/// excludes the case instead of aborting the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("Score for '{criterion}' is outside [0, 1]: {value}")]
    OutOfRange { criterion: Criterion, value: f64 },
}
