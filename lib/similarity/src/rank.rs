//! Two-stage candidate ranking
//!
//! Stage 1 scores every case on scenario similarity only and drops cases
//! below the configured threshold. Stage 2 scores the survivors on the
//! remaining criteria and folds everything into a composite score. Survivors
//! are sorted by composite score, descending, with a stable sort so ties keep
//! catalog order, and truncated to the top N.
//!
//! Every case yields a `Result`; failures are recorded as [`CaseFailure`]s
//! and never abort the batch.

use crate::explain::{match_reasons, MatchReasons, RankingStats};
use crate::scorer::{ScoreBreakdown, Scorer};
use crate::semantic::TextSimilarity;
use crate::ScoringError;
use chainmatch_core::{CriterionWeights, EngineConfig, Query, ReferenceCase};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::Serialize;

/// A case that survived both stages
#[derive(Debug, Clone)]
pub struct ScoredMatch<'c> {
    pub case: &'c ReferenceCase,
    pub breakdown: ScoreBreakdown,
    /// Weighted composite score in [0, 1]
    pub score: f64,
    pub reasons: MatchReasons,
}

/// Stage at which a case failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStage {
    ScenarioFilter,
    FullScoring,
}

/// A case excluded from ranking because scoring failed
#[derive(Debug, Clone, Serialize)]
pub struct CaseFailure {
    pub case_name: String,
    pub stage: RankingStage,
    #[serde(serialize_with = "crate::explain::serialize_display")]
    pub error: ScoringError,
}

impl CaseFailure {
    fn record(case: &ReferenceCase, stage: RankingStage, error: ScoringError) -> Self {
        tracing::warn!(case = %case.name, ?stage, error = %error, "excluding case from ranking");
        Self {
            case_name: case.name.clone(),
            stage,
            error,
        }
    }
}

/// Output of one ranking pass
#[derive(Debug, Clone)]
pub struct Ranking<'c> {
    /// Top matches, best first
    pub matches: Vec<ScoredMatch<'c>>,
    pub failures: Vec<CaseFailure>,
    pub stats: RankingStats,
    /// Weights the composite scores were computed with
    pub weights: CriterionWeights,
}

/// Filter-then-rank pipeline over a case catalog
#[derive(Debug, Clone)]
pub struct CandidateRanker<S> {
    scorer: Scorer<S>,
    scenario_threshold: f64,
    top_n: usize,
    default_weights: CriterionWeights,
}

impl<S: TextSimilarity> CandidateRanker<S> {
    /// Create a ranker; `config` is expected to be validated
    pub fn new(text: S, config: &EngineConfig) -> Self {
        Self {
            scorer: Scorer::new(text, config),
            scenario_threshold: config.scenario_threshold,
            top_n: config.top_n,
            default_weights: config.weights,
        }
    }

    pub fn scorer(&self) -> &Scorer<S> {
        &self.scorer
    }

    pub fn scenario_threshold(&self) -> f64 {
        self.scenario_threshold
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank `cases` against `query`
    ///
    /// The query's own weights are used when present, otherwise the
    /// configured defaults.
    pub fn rank<'c>(&self, query: &Query, cases: &'c [ReferenceCase]) -> Ranking<'c> {
        let weights = query.weights.unwrap_or(self.default_weights);
        let mut failures = Vec::new();

        // Stage 1: scenario pre-filter
        let scenario_scores: Vec<Result<f64, ScoringError>> = cases
            .par_iter()
            .map(|case| self.scorer.scenario(query, case))
            .collect();

        let mut survivors = Vec::new();
        for (index, result) in scenario_scores.into_iter().enumerate() {
            match result {
                Ok(score) if score >= self.scenario_threshold => survivors.push((index, score)),
                Ok(_) => {}
                Err(error) => failures.push(CaseFailure::record(
                    &cases[index],
                    RankingStage::ScenarioFilter,
                    error,
                )),
            }
        }
        tracing::debug!(
            catalog = cases.len(),
            survivors = survivors.len(),
            threshold = self.scenario_threshold,
            "scenario pre-filter done"
        );

        // Stage 2: full scoring of survivors only
        let completed: Vec<(usize, Result<ScoreBreakdown, ScoringError>)> = survivors
            .par_iter()
            .map(|&(index, scenario)| (index, self.scorer.complete(query, &cases[index], scenario)))
            .collect();

        let mut scored = Vec::with_capacity(completed.len());
        for (index, result) in completed {
            let case = &cases[index];
            match result {
                Ok(breakdown) => scored.push(ScoredMatch {
                    case,
                    score: breakdown.composite(&weights),
                    breakdown,
                    reasons: MatchReasons::new(),
                }),
                Err(error) => {
                    failures.push(CaseFailure::record(case, RankingStage::FullScoring, error))
                }
            }
        }

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| OrderedFloat(b.score).cmp(&OrderedFloat(a.score)));
        scored.truncate(self.top_n);

        for matched in &mut scored {
            matched.reasons = match_reasons(query, matched.case);
        }

        let stats = RankingStats::compute(&scored, &weights, cases.len(), survivors.len(), failures.len());
        tracing::debug!(
            results = stats.results_count,
            failed = stats.failed_count,
            best = stats.best_score,
            "ranking done"
        );

        Ranking {
            matches: scored,
            failures,
            stats,
            weights,
        }
    }
}
