//! Combined matching and recommendation
//!
//! The [`Advisor`] normalizes a submission once, then runs case matching and
//! the recommendation engine independently on the same query.

use chainmatch_core::{
    normalize_submission, EngineConfig, Query, RawSubmission, ReferenceCase, Result,
};
use chainmatch_recommend::{recommend, Recommendation};
use chainmatch_similarity::{
    CachedEmbedder, CandidateRanker, EmbeddingSimilarity, HashEmbedder, MatchResponse,
    TextSimilarity,
};
use serde::Serialize;

/// Ranked matches and an architecture recommendation for one submission
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub matches: MatchResponse,
    pub recommendation: Recommendation,
}

/// Entry point for callers holding raw submissions and a normalized catalog
///
/// Holds no per-request state; one advisor can serve concurrent requests.
#[derive(Debug)]
pub struct Advisor<S> {
    config: EngineConfig,
    ranker: CandidateRanker<S>,
}

impl Advisor<EmbeddingSimilarity<CachedEmbedder<HashEmbedder>>> {
    /// Advisor backed by the offline hash embedder
    pub fn hashed(config: EngineConfig) -> Result<Self> {
        Self::new(EmbeddingSimilarity::hashed(), config)
    }
}

impl<S: TextSimilarity> Advisor<S> {
    pub fn new(text: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let ranker = CandidateRanker::new(text, &config);
        Ok(Self { config, ranker })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalize a submission, validating any weight override
    pub fn normalize(&self, raw: &RawSubmission) -> Result<Query> {
        normalize_submission(raw, &self.config.weights)
    }

    pub fn match_cases(&self, query: &Query, catalog: &[ReferenceCase]) -> MatchResponse {
        MatchResponse::from(self.ranker.rank(query, catalog))
    }

    pub fn recommend(&self, query: &Query) -> Recommendation {
        recommend(query)
    }

    /// Normalize, match and recommend
    ///
    /// Fails only when the submission itself is malformed; per-case problems
    /// are reported inside the returned matches.
    pub fn advise(&self, raw: &RawSubmission, catalog: &[ReferenceCase]) -> Result<Advice> {
        let query = self.normalize(raw)?;
        Ok(Advice {
            matches: self.match_cases(&query, catalog),
            recommendation: self.recommend(&query),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainmatch_core::{normalize_case, Error, RawCase};
    use serde_json::json;

    fn raw_submission() -> RawSubmission {
        RawSubmission {
            application_scenarios: "multi-party supply chain finance".to_string(),
            technical_requirements: Some(json!({"tps": 1000, "latency": 2, "security_level": "medium"})),
            technology_stack: Some(json!("java, kafka")),
            city_size: Some("small".to_string()),
            budget_range: Some(json!([50000, 200000])),
            weights: None,
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig { top_n: 0, ..EngineConfig::default() };
        assert!(matches!(Advisor::hashed(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_advise_combines_both_results() {
        let advisor = Advisor::hashed(EngineConfig::default()).unwrap();
        let catalog = vec![normalize_case(&RawCase {
            name: "Trade finance network".to_string(),
            application_scenarios: "multi-party supply chain finance".to_string(),
            technical_requirements: Some(json!({"tps": 1200, "latency": 2, "security_level": "medium"})),
            technology_stack: Some(json!(["Java"])),
            city_size: Some("small".to_string()),
            budget_range: Some(json!([100000, 300000])),
        })];

        let advice = advisor.advise(&raw_submission(), &catalog).unwrap();
        assert_eq!(advice.matches.result.len(), 1);
        assert_eq!(advice.matches.result[0].case_name, "Trade finance network");
        assert_eq!(advice.recommendation.platform.as_str(), "Quorum");

        let json = serde_json::to_value(&advice).unwrap();
        assert_eq!(json["recommendation"]["consensus"], "RAFT");
        assert!(json["matches"]["result"][0]["score"].as_f64().unwrap() > 0.6);
    }

    #[test]
    fn test_malformed_submission_surfaces_error() {
        let advisor = Advisor::hashed(EngineConfig::default()).unwrap();
        let mut raw = raw_submission();
        raw.technical_requirements = Some(json!("{\"tps\": 10}"));
        assert!(matches!(
            advisor.advise(&raw, &[]),
            Err(Error::InvalidInputFormat(_))
        ));
    }
}
