//! # ChainMatch Core
//!
//! Core data model for the ChainMatch recommendation engine.
//!
//! This crate provides the records both engines consume:
//!
//! - [`Query`] - a normalized description of a user's project
//! - [`ReferenceCase`] - a catalog entry used as a comparison target
//! - [`RawSubmission`] / [`RawCase`] - the loosely encoded shapes persisted
//!   by external collaborators, and the normalizer turning them into the above
//! - [`CriterionWeights`] - immutable weight map for the five criteria
//! - [`EngineConfig`] - tunable thresholds, sigmas and default weights
//!
//! ## Example
//!
//! ```rust
//! use chainmatch_core::{normalize_submission, CriterionWeights, RawSubmission, SecurityLevel};
//! use serde_json::json;
//!
//! let raw = RawSubmission {
//!     application_scenarios: "Multi-party supply chain finance".to_string(),
//!     technical_requirements: Some(json!(r#"{"tps": 1500, "latency": 2, "security_level": "medium"}"#)),
//!     technology_stack: Some(json!("Java, Kafka")),
//!     city_size: Some("small".to_string()),
//!     budget_range: Some(json!([50000, 200000])),
//!     weights: None,
//! };
//!
//! let query = normalize_submission(&raw, &CriterionWeights::default()).unwrap();
//! assert_eq!(query.technical_requirements.security_level, SecurityLevel::Medium);
//! assert!(query.technology_stack.contains("kafka"));
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod weights;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use model::{
    BudgetRange, CitySize, Query, ReferenceCase, SecurityLevel, TechStack, TechnicalRequirements,
};
pub use normalize::{normalize_case, normalize_catalog, normalize_submission, RawCase, RawSubmission};
pub use weights::{Criterion, CriterionWeights};
