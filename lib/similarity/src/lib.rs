//! # ChainMatch Similarity
//!
//! Multi-criteria case matching for ChainMatch.
//!
//! This crate ranks a catalog of reference cases against a normalized
//! [`Query`](chainmatch_core::Query) and explains the matches.
//!
//! ## Features
//!
//! - **Per-criterion similarity**: semantic scenario similarity, gaussian
//!   technical-requirement similarity, Jaccard stack overlap, city size and
//!   budget interval similarity
//! - **Pluggable text similarity**: the scenario criterion goes through the
//!   [`TextSimilarity`] capability, backed by any [`Embedder`]
//! - **Two-stage ranking**: a cheap scenario pre-filter, then full scoring of
//!   survivors only, with per-case failure isolation
//! - **Explainability**: ordered match reasons and per-criterion breakdowns
//!
//! ## Example
//!
//! ```rust
//! use chainmatch_core::{normalize_case, normalize_submission, EngineConfig, RawCase, RawSubmission};
//! use chainmatch_similarity::{CandidateRanker, EmbeddingSimilarity, MatchResponse};
//! use serde_json::json;
//!
//! let config = EngineConfig::default();
//! let raw = RawSubmission {
//!     application_scenarios: "smart parking payments".to_string(),
//!     technical_requirements: Some(json!({"tps": 800, "latency": 2, "security_level": "medium"})),
//!     technology_stack: Some(json!("go, postgres")),
//!     city_size: Some("medium".to_string()),
//!     budget_range: Some(json!([50000, 150000])),
//!     weights: None,
//! };
//! let query = normalize_submission(&raw, &config.weights).unwrap();
//!
//! let catalog = vec![normalize_case(&RawCase {
//!     name: "Parking ledger".to_string(),
//!     application_scenarios: "smart parking payments".to_string(),
//!     technical_requirements: Some(json!({"tps": 1000, "latency": 2, "security_level": "medium"})),
//!     technology_stack: Some(json!("go")),
//!     city_size: Some("medium".to_string()),
//!     budget_range: Some(json!([80000, 120000])),
//! })];
//!
//! let ranker = CandidateRanker::new(EmbeddingSimilarity::hashed(), &config);
//! let response = MatchResponse::from(ranker.rank(&query, &catalog));
//! assert_eq!(response.result.len(), 1);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│  Stage 1    │────>│  Stage 2    │
//! │  + catalog  │     │ (scenario)  │     │ (4 criteria)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Explain    │<────│ Sort, top N │
//!                     │  (reasons)  │     │  (stable)   │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod distance;
pub mod embedder;
pub mod error;
pub mod explain;
pub mod rank;
pub mod scorer;
pub mod semantic;

// Re-export main types for convenience
pub use embedder::{CachedEmbedder, Embedder, HashEmbedder, DEFAULT_EMBEDDING_DIM};
pub use error::{EmbedError, ScoringError};
pub use explain::{match_reasons, MatchReasons, MatchResponse, MatchResult, RankingStats};
pub use rank::{CandidateRanker, CaseFailure, Ranking, RankingStage, ScoredMatch};
pub use scorer::{ScoreBreakdown, Scorer};
pub use semantic::{scenario_similarity, EmbeddingSimilarity, TextSimilarity};
