//! Similarity scorer
//!
//! Computes the five independent per-criterion similarities between a query
//! and one reference case, and folds them into a composite score.

use crate::distance::{
    budget_similarity, city_size_similarity, tech_stack_similarity, technical_similarity,
};
use crate::semantic::TextSimilarity;
use crate::ScoringError;
use chainmatch_core::{Criterion, CriterionWeights, EngineConfig, Query, ReferenceCase};
use serde::Serialize;
use std::collections::BTreeMap;

/// Unweighted per-criterion similarities, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub scenario: f64,
    pub tech_req: f64,
    pub tech_stack: f64,
    pub city_size: f64,
    pub budget: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Scenario => self.scenario,
            Criterion::TechReq => self.tech_req,
            Criterion::TechStack => self.tech_stack,
            Criterion::CitySize => self.city_size,
            Criterion::Budget => self.budget,
        }
    }

    /// Weighted sum of the sub-scores, clamped to [0, 1]
    pub fn composite(&self, weights: &CriterionWeights) -> f64 {
        Criterion::ALL
            .iter()
            .map(|&c| self.get(c) * weights.get(c))
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    /// Weighted contribution of each criterion to the composite score
    pub fn contributions(&self, weights: &CriterionWeights) -> BTreeMap<Criterion, f64> {
        Criterion::ALL
            .iter()
            .map(|&c| (c, self.get(c) * weights.get(c)))
            .collect()
    }

    /// Criterion with the largest weighted contribution
    pub fn top_contributor(&self, weights: &CriterionWeights) -> Criterion {
        Criterion::ALL
            .into_iter()
            .max_by(|&a, &b| {
                (self.get(a) * weights.get(a))
                    .partial_cmp(&(self.get(b) * weights.get(b)))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(Criterion::Scenario)
    }

    fn check(self) -> Result<Self, ScoringError> {
        for criterion in Criterion::ALL {
            let value = self.get(criterion);
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoringError::OutOfRange { criterion, value });
            }
        }
        Ok(self)
    }
}

/// Scores query/case pairs on all five criteria
#[derive(Debug, Clone)]
pub struct Scorer<S> {
    text: S,
    tps_sigma: f64,
    latency_sigma: f64,
}

impl<S: TextSimilarity> Scorer<S> {
    pub fn new(text: S, config: &EngineConfig) -> Self {
        Self {
            text,
            tps_sigma: config.tps_sigma,
            latency_sigma: config.latency_sigma,
        }
    }

    pub fn text_similarity(&self) -> &S {
        &self.text
    }

    /// Scenario similarity alone, the expensive model-backed criterion
    pub fn scenario(&self, query: &Query, case: &ReferenceCase) -> Result<f64, ScoringError> {
        let value = self.text.similarity(&query.scenario, &case.scenario)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(ScoringError::OutOfRange {
                criterion: Criterion::Scenario,
                value,
            });
        }
        Ok(value)
    }

    /// The four remaining criteria, combined with an already known scenario score
    pub fn complete(
        &self,
        query: &Query,
        case: &ReferenceCase,
        scenario: f64,
    ) -> Result<ScoreBreakdown, ScoringError> {
        ScoreBreakdown {
            scenario,
            tech_req: technical_similarity(
                &query.technical_requirements,
                &case.technical_requirements,
                self.tps_sigma,
                self.latency_sigma,
            ),
            tech_stack: tech_stack_similarity(&query.technology_stack, &case.technology_stack),
            city_size: city_size_similarity(query.city_size, case.city_size),
            budget: budget_similarity(&query.budget_range, &case.budget_range),
        }
        .check()
    }

    /// All five criteria in one pass
    pub fn score(&self, query: &Query, case: &ReferenceCase) -> Result<ScoreBreakdown, ScoringError> {
        let scenario = self.scenario(query, case)?;
        self.complete(query, case, scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::EmbeddingSimilarity;
    use chainmatch_core::{BudgetRange, CitySize, SecurityLevel, TechStack, TechnicalRequirements};

    fn query() -> Query {
        Query {
            scenario: "city-wide energy trading between households".to_string(),
            technical_requirements: TechnicalRequirements {
                tps: 2500.0,
                latency: 3.0,
                security_level: SecurityLevel::Medium,
            },
            technology_stack: TechStack::parse_delimited("go, ethereum"),
            city_size: CitySize::Large,
            budget_range: BudgetRange::new(200_000.0, 600_000.0).unwrap(),
            weights: None,
        }
    }

    fn case_from(query: &Query) -> ReferenceCase {
        ReferenceCase {
            name: "mirror".to_string(),
            scenario: query.scenario.clone(),
            technical_requirements: query.technical_requirements,
            technology_stack: query.technology_stack.clone(),
            city_size: query.city_size,
            budget_range: query.budget_range,
            defaulted_fields: Vec::new(),
        }
    }

    #[test]
    fn test_identical_pair_scores_one() {
        let scorer = Scorer::new(EmbeddingSimilarity::hashed(), &EngineConfig::default());
        let q = query();
        let breakdown = scorer.score(&q, &case_from(&q)).unwrap();
        let composite = breakdown.composite(&CriterionWeights::default());
        assert!((composite - 1.0).abs() < 1e-6, "got {composite}");
    }

    #[test]
    fn test_all_scores_bounded() {
        let scorer = Scorer::new(EmbeddingSimilarity::hashed(), &EngineConfig::default());
        let q = query();
        let mut case = case_from(&q);
        case.scenario = "hospital records".to_string();
        case.technical_requirements.tps = 90_000.0;
        case.technology_stack = TechStack::parse_delimited("cobol");
        case.city_size = CitySize::Small;
        case.budget_range = BudgetRange::new(1.0, 2.0).unwrap();

        let breakdown = scorer.score(&q, &case).unwrap();
        for criterion in Criterion::ALL {
            let value = breakdown.get(criterion);
            assert!((0.0..=1.0).contains(&value), "{criterion} = {value}");
        }
        let composite = breakdown.composite(&CriterionWeights::default());
        assert!((0.0..=1.0).contains(&composite));
    }

    #[test]
    fn test_contributions_sum_to_composite() {
        let breakdown = ScoreBreakdown {
            scenario: 0.9,
            tech_req: 0.5,
            tech_stack: 0.0,
            city_size: 1.0,
            budget: 0.4,
        };
        let weights = CriterionWeights::default();
        let total: f64 = breakdown.contributions(&weights).values().sum();
        assert!((total - breakdown.composite(&weights)).abs() < 1e-12);
        assert_eq!(breakdown.top_contributor(&weights), Criterion::Scenario);
    }

    #[test]
    fn test_out_of_range_sub_score_rejected() {
        let breakdown = ScoreBreakdown {
            scenario: 0.9,
            tech_req: f64::NAN,
            tech_stack: 0.0,
            city_size: 1.0,
            budget: 0.4,
        };
        assert!(matches!(
            breakdown.check(),
            Err(ScoringError::OutOfRange { criterion: Criterion::TechReq, .. })
        ));
    }
}
