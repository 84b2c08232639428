//! Engine configuration
//!
//! The scenario pre-filter threshold and the gaussian sigmas are tunable
//! values, not fixed constants. Every field has a default so a partial JSON
//! file is enough to override a single knob.

use crate::{CriterionWeights, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SCENARIO_THRESHOLD: f64 = 0.6;
pub const DEFAULT_TOP_N: usize = 3;
pub const DEFAULT_TPS_SIGMA: f64 = 500.0;
pub const DEFAULT_LATENCY_SIGMA: f64 = 100.0;

/// Configuration shared by the ranker and the scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum scenario similarity a case needs to survive stage 1
    pub scenario_threshold: f64,
    /// Maximum number of matches returned
    pub top_n: usize,
    pub tps_sigma: f64,
    pub latency_sigma: f64,
    /// Weights used when a request carries no override
    pub weights: CriterionWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scenario_threshold: DEFAULT_SCENARIO_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            tps_sigma: DEFAULT_TPS_SIGMA,
            latency_sigma: DEFAULT_LATENCY_SIGMA,
            weights: CriterionWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.scenario_threshold) {
            return Err(Error::InvalidConfig(format!(
                "scenario_threshold must lie in [0, 1], got {}",
                self.scenario_threshold
            )));
        }
        if self.top_n == 0 {
            return Err(Error::InvalidConfig("top_n must be at least 1".to_string()));
        }
        for (name, sigma) in [("tps_sigma", self.tps_sigma), ("latency_sigma", self.latency_sigma)] {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a positive number, got {sigma}"
                )));
            }
        }
        self.weights.validate()
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&text).map_err(|e| {
            Error::InvalidConfig(format!("{}: {e}", path.as_ref().display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}
