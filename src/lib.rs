//! # ChainMatch
//!
//! Blockchain architecture case matching and recommendation.
//!
//! A user describes a project through five attributes: application scenario,
//! technical requirements, technology stack, target city size and budget
//! range. ChainMatch answers with:
//!
//! - the best matching **reference cases** from a catalog, ranked by a
//!   weighted multi-criteria similarity with per-criterion breakdowns and
//!   human-readable reasons
//! - an **architecture recommendation** (blockchain type, platform,
//!   consensus, storage, network topology, security advice) from a
//!   deterministic decision chain
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! chainmatch --submission submission.json --cases cases.json --pretty
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use chainmatch::prelude::*;
//! use serde_json::json;
//!
//! let advisor = Advisor::hashed(EngineConfig::default()).unwrap();
//!
//! let submission = RawSubmission {
//!     application_scenarios: "public retail loyalty rewards".to_string(),
//!     technical_requirements: Some(json!({"tps": 8000, "latency": 0.5, "security_level": "medium"})),
//!     technology_stack: Some(json!("solidity, react")),
//!     city_size: Some("large".to_string()),
//!     budget_range: Some(json!([300000, 900000])),
//!     weights: None,
//! };
//! let catalog = normalize_catalog(&[]);
//!
//! let advice = advisor.advise(&submission, &catalog).unwrap();
//! assert_eq!(advice.recommendation.platform, Platform::Solana);
//! ```
//!
//! ## Crate Structure
//!
//! - `chainmatch-core` - data model, normalization, weights, configuration
//! - `chainmatch-similarity` - similarity scoring, two-stage ranking, explanations
//! - `chainmatch-recommend` - rule-based architecture recommendation

pub mod advisor;

pub use advisor::{Advice, Advisor};

// Re-export core types
pub use chainmatch_core::{
    normalize_case, normalize_catalog, normalize_submission, BudgetRange, CitySize, Criterion,
    CriterionWeights, EngineConfig, Error, Query, RawCase, RawSubmission, ReferenceCase, Result,
    SecurityLevel, TechStack, TechnicalRequirements,
};

// Re-export similarity
pub use chainmatch_similarity::{
    CandidateRanker, CaseFailure, EmbedError, Embedder, EmbeddingSimilarity, HashEmbedder,
    MatchResponse, MatchResult, RankingStats, ScoreBreakdown, ScoringError, TextSimilarity,
};

// Re-export recommendation
pub use chainmatch_recommend::{BlockchainType, Consensus, Platform, Recommendation, Storage};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        normalize_case, normalize_catalog, normalize_submission, Advice, Advisor, BlockchainType,
        CandidateRanker, Consensus, CriterionWeights, EmbeddingSimilarity, EngineConfig, Error,
        MatchResponse, Platform, Query, RawCase, RawSubmission, Recommendation, ReferenceCase,
        Result, Storage, TextSimilarity,
    };
}

/// Per-attribute similarity functions
pub mod distance {
    pub use chainmatch_similarity::distance::{
        budget_similarity, city_size_similarity, gaussian_similarity, security_similarity,
        tech_stack_similarity, technical_similarity,
    };
}
