//! Explainability for ranked matches
//!
//! Provides short human-readable match reasons, the serialisable result
//! shape handed to external collaborators, and summary statistics.

use crate::rank::{CaseFailure, Ranking, ScoredMatch};
use crate::scorer::ScoreBreakdown;
use chainmatch_core::{BudgetRange, CitySize, Criterion, CriterionWeights, Query, ReferenceCase};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt::Display;

/// Maximum number of reasons reported per match
pub const MAX_REASONS: usize = 3;

/// Ordered match reasons, at most [`MAX_REASONS`]
pub type MatchReasons = SmallVec<[String; MAX_REASONS]>;

/// Reasons a case matches a query, in fixed priority order
///
/// Conditions are checked in this order and only the first three that hold
/// are reported: city size equal, budget ranges overlap, shared technology,
/// security level equal.
pub fn match_reasons(query: &Query, case: &ReferenceCase) -> MatchReasons {
    let mut reasons = MatchReasons::new();

    if query.city_size == case.city_size {
        reasons.push(format!("City size match: {}", case.city_size));
    }

    if case.budget_range.min() <= query.budget_range.max()
        && case.budget_range.max() >= query.budget_range.min()
    {
        reasons.push(format!("Budget range overlap: case budget {}", case.budget_range));
    }

    let shared = query.technology_stack.intersection(&case.technology_stack);
    if !shared.is_empty() {
        reasons.push(format!("Shared technology: {}", shared.join(", ")));
    }

    if query.technical_requirements.security_level == case.technical_requirements.security_level {
        reasons.push(format!(
            "Security level match: {}",
            case.technical_requirements.security_level
        ));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}

/// A ranked match as handed to external collaborators
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub score: f64,
    pub case_name: String,
    pub application_scenarios: String,
    pub technology_stack: Vec<String>,
    pub city_size: CitySize,
    pub budget_range: BudgetRange,
    pub match_reasons: MatchReasons,
    /// Unweighted per-criterion similarities
    pub match_breakdown: ScoreBreakdown,
    /// Stored fields replaced with defaults while loading the case
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defaulted_fields: Vec<String>,
}

impl From<&ScoredMatch<'_>> for MatchResult {
    fn from(matched: &ScoredMatch<'_>) -> Self {
        let case = matched.case;
        Self {
            score: matched.score,
            case_name: case.name.clone(),
            application_scenarios: case.scenario.clone(),
            technology_stack: case.technology_stack.iter().map(str::to_string).collect(),
            city_size: case.city_size,
            budget_range: case.budget_range,
            match_reasons: matched.reasons.clone(),
            match_breakdown: matched.breakdown,
            defaulted_fields: case.defaulted_fields.clone(),
        }
    }
}

/// Matches plus everything needed to audit how they were produced
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub result: Vec<MatchResult>,
    pub stats: RankingStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<CaseFailure>,
    pub weights: CriterionWeights,
}

impl From<Ranking<'_>> for MatchResponse {
    fn from(ranking: Ranking<'_>) -> Self {
        Self {
            result: ranking.matches.iter().map(MatchResult::from).collect(),
            stats: ranking.stats,
            failures: ranking.failures,
            weights: ranking.weights,
        }
    }
}

/// Summary statistics for a ranking pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    /// Number of cases in the catalog
    pub catalog_size: usize,
    /// Cases that passed the scenario pre-filter
    pub scenario_survivors: usize,
    /// Cases excluded because scoring failed
    pub failed_count: usize,
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Criterion that contributed most to the best match
    pub top_contributing_criterion: Option<Criterion>,
}

impl RankingStats {
    /// Compute stats from sorted matches
    pub fn compute(
        matches: &[ScoredMatch<'_>],
        weights: &CriterionWeights,
        catalog_size: usize,
        scenario_survivors: usize,
        failed_count: usize,
    ) -> Self {
        let Some(best) = matches.first() else {
            return Self {
                catalog_size,
                scenario_survivors,
                failed_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_criterion: None,
            };
        };

        let avg_score = matches.iter().map(|m| m.score).sum::<f64>() / matches.len() as f64;

        Self {
            catalog_size,
            scenario_survivors,
            failed_count,
            results_count: matches.len(),
            avg_score,
            best_score: best.score,
            top_contributing_criterion: Some(best.breakdown.top_contributor(weights)),
        }
    }
}

pub(crate) fn serialize_display<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
