//! Criterion weights
//!
//! The composite match score is a weighted sum of five per-criterion
//! similarities. Weights are immutable values: a request override produces a
//! new [`CriterionWeights`] rather than mutating a shared default.

use crate::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance applied when comparing weight sums against 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// One of the five matching criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Scenario,
    TechReq,
    TechStack,
    CitySize,
    Budget,
}

impl Criterion {
    /// All criteria in canonical order
    pub const ALL: [Criterion; 5] = [
        Criterion::Scenario,
        Criterion::TechReq,
        Criterion::TechStack,
        Criterion::CitySize,
        Criterion::Budget,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Scenario => "scenario",
            Criterion::TechReq => "tech_req",
            Criterion::TechStack => "tech_stack",
            Criterion::CitySize => "city_size",
            Criterion::Budget => "budget",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| Error::WeightValidationError(format!("unknown criterion '{s}'")))
    }
}

/// Weight per criterion
///
/// Every weight is finite and non-negative. The struct does not force a sum
/// of exactly 1.0; [`CriterionWeights::validate`] only rejects totals above 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriterionWeights {
    pub scenario: f64,
    pub tech_req: f64,
    pub tech_stack: f64,
    pub city_size: f64,
    pub budget: f64,
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            scenario: 0.30,
            tech_req: 0.25,
            tech_stack: 0.20,
            city_size: 0.15,
            budget: 0.10,
        }
    }
}

impl CriterionWeights {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Scenario => self.scenario,
            Criterion::TechReq => self.tech_req,
            Criterion::TechStack => self.tech_stack,
            Criterion::CitySize => self.city_size,
            Criterion::Budget => self.budget,
        }
    }

    fn slot_mut(&mut self, criterion: Criterion) -> &mut f64 {
        match criterion {
            Criterion::Scenario => &mut self.scenario,
            Criterion::TechReq => &mut self.tech_req,
            Criterion::TechStack => &mut self.tech_stack,
            Criterion::CitySize => &mut self.city_size,
            Criterion::Budget => &mut self.budget,
        }
    }

    pub fn sum(&self) -> f64 {
        Criterion::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Check every weight is finite, non-negative and the total is at most 1
    pub fn validate(&self) -> Result<()> {
        for criterion in Criterion::ALL {
            check_weight(criterion.as_str(), self.get(criterion))?;
        }
        let total = self.sum();
        if total > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(Error::WeightValidationError(format!(
                "weights sum to {total:.4}, which exceeds 1.0"
            )));
        }
        Ok(())
    }

    /// Apply a per-request override map on top of these weights
    ///
    /// The values supplied in `overrides` must sum to at most 1.0 and are
    /// kept exactly as given; criteria not named keep their current weight.
    /// If the merged total then exceeds 1.0, only the unnamed criteria are
    /// shrunk proportionally to fit the remaining `1 - provided` share.
    pub fn with_overrides(&self, overrides: &AHashMap<String, f64>) -> Result<Self> {
        let mut merged = *self;
        let mut provided = [false; Criterion::ALL.len()];
        let mut provided_total = 0.0;

        for (name, &value) in overrides {
            let criterion: Criterion = name.parse()?;
            check_weight(name, value)?;
            provided_total += value;
            provided[criterion as usize] = true;
            *merged.slot_mut(criterion) = value;
        }

        if provided_total > 1.0 + WEIGHT_SUM_TOLERANCE {
            return Err(Error::WeightValidationError(format!(
                "override weights sum to {provided_total:.4}, which exceeds 1.0"
            )));
        }

        let defaulted: Vec<Criterion> = Criterion::ALL
            .into_iter()
            .filter(|&c| !provided[c as usize])
            .collect();
        let defaulted_total: f64 = defaulted.iter().map(|&c| merged.get(c)).sum();
        let remaining = (1.0 - provided_total).max(0.0);

        if defaulted_total > remaining + WEIGHT_SUM_TOLERANCE {
            let factor = remaining / defaulted_total;
            tracing::warn!(
                provided_total,
                defaulted_total,
                factor,
                "shrinking default weights to fit beside the override"
            );
            for criterion in defaulted {
                *merged.slot_mut(criterion) *= factor;
            }
        }

        Ok(merged)
    }
}

fn check_weight(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::WeightValidationError(format!(
            "weight for '{name}' must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, f64)]) -> AHashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = CriterionWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_override_sum_above_one_rejected() {
        let base = CriterionWeights::default();
        let result = base.with_overrides(&overrides(&[("scenario", 0.5), ("budget", 0.6)]));
        assert!(matches!(result, Err(Error::WeightValidationError(_))));
    }

    #[test]
    fn test_override_keeps_missing_defaults() {
        let base = CriterionWeights::default();
        let merged = base
            .with_overrides(&overrides(&[("scenario", 0.1), ("budget", 0.05)]))
            .unwrap();
        assert_eq!(merged.scenario, 0.1);
        assert_eq!(merged.budget, 0.05);
        assert_eq!(merged.tech_req, 0.25);
        assert_eq!(merged.city_size, 0.15);
    }

    #[test]
    fn test_override_value_kept_exactly_and_defaults_shrunk() {
        let base = CriterionWeights::default();
        let merged = base.with_overrides(&overrides(&[("scenario", 0.9)])).unwrap();
        assert_eq!(merged.scenario, 0.9);

        let rest = merged.tech_req + merged.tech_stack + merged.city_size + merged.budget;
        assert!(rest <= 0.1 + WEIGHT_SUM_TOLERANCE, "got {rest}");
        // Defaults keep their relative proportions
        assert!((merged.tech_req / merged.budget - 2.5).abs() < 1e-9);
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn test_full_override_leaves_nothing_for_defaults() {
        let base = CriterionWeights::default();
        let merged = base
            .with_overrides(&overrides(&[("tech_stack", 0.6), ("budget", 0.4)]))
            .unwrap();
        assert_eq!(merged.tech_stack, 0.6);
        assert_eq!(merged.budget, 0.4);
        assert_eq!(merged.scenario, 0.0);
        assert_eq!(merged.tech_req, 0.0);
        assert_eq!(merged.city_size, 0.0);
    }

    #[test]
    fn test_unknown_or_negative_override_rejected() {
        let base = CriterionWeights::default();
        assert!(base.with_overrides(&overrides(&[("colour", 0.1)])).is_err());
        assert!(base.with_overrides(&overrides(&[("budget", -0.1)])).is_err());
        assert!(base.with_overrides(&overrides(&[("budget", f64::NAN)])).is_err());
    }

    #[test]
    fn test_criterion_names_round_trip() {
        for criterion in Criterion::ALL {
            assert_eq!(criterion.as_str().parse::<Criterion>().unwrap(), criterion);
        }
    }
}
