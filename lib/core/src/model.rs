//! Canonical query and reference-case records
//!
//! Everything the matching and recommendation engines consume is expressed
//! with the types in this module. Raw, possibly string-encoded records are
//! turned into these by [`crate::normalize`].

use crate::{CriterionWeights, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Required security level, ordered `low < medium < high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl SecurityLevel {
    /// Ordinal rank used by the security similarity (low=0, medium=1, high=2)
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            SecurityLevel::Low => 0,
            SecurityLevel::Medium => 1,
            SecurityLevel::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SecurityLevel::Low),
            "medium" => Ok(SecurityLevel::Medium),
            "high" => Ok(SecurityLevel::High),
            other => Err(Error::InvalidInputFormat(format!(
                "unknown security level '{other}', expected low, medium or high"
            ))),
        }
    }
}

/// Target city size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitySize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CitySize {
    pub fn as_str(self) -> &'static str {
        match self {
            CitySize::Small => "small",
            CitySize::Medium => "medium",
            CitySize::Large => "large",
        }
    }
}

impl fmt::Display for CitySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitySize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(CitySize::Small),
            "medium" => Ok(CitySize::Medium),
            "large" => Ok(CitySize::Large),
            other => Err(Error::InvalidInputFormat(format!(
                "unknown city size '{other}', expected small, medium or large"
            ))),
        }
    }
}

/// Throughput, latency and security requirements of a project
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalRequirements {
    /// Transactions per second
    pub tps: f64,
    /// Expected confirmation latency in seconds
    pub latency: f64,
    pub security_level: SecurityLevel,
}

impl Default for TechnicalRequirements {
    fn default() -> Self {
        Self {
            tps: 1000.0,
            latency: 1.0,
            security_level: SecurityLevel::Medium,
        }
    }
}

/// Closed budget interval `[min, max]` with `min <= max`
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct BudgetRange {
    min: f64,
    max: f64,
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidInputFormat(format!(
                "budget bounds must be finite numbers, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(Error::InvalidInputFormat(format!(
                "budget minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Whether the two closed intervals share at least one point
    pub fn overlaps(&self, other: &BudgetRange) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    /// Length of the intersection, 0 when disjoint
    pub fn overlap_len(&self, other: &BudgetRange) -> f64 {
        (self.max.min(other.max) - self.min.max(other.min)).max(0.0)
    }
}

impl Default for BudgetRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100_000.0,
        }
    }
}

impl From<BudgetRange> for [f64; 2] {
    fn from(range: BudgetRange) -> Self {
        [range.min, range.max]
    }
}

impl TryFrom<[f64; 2]> for BudgetRange {
    type Error = Error;

    fn try_from([min, max]: [f64; 2]) -> Result<Self> {
        BudgetRange::new(min, max)
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Case-insensitive set of technology tags
///
/// Tags are trimmed and lowercased on insertion; empty tags are dropped.
/// Iteration order is sorted, which keeps every derived output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct TechStack(BTreeSet<String>);

impl TechStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a comma-delimited list such as `"Java, Kafka ,fabric"`
    pub fn parse_delimited(text: &str) -> Self {
        text.split(',').collect()
    }

    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return false;
        }
        self.0.insert(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Tags present in both stacks, sorted
    pub fn intersection<'a>(&'a self, other: &'a TechStack) -> Vec<&'a str> {
        self.0.intersection(&other.0).map(String::as_str).collect()
    }

    /// Number of distinct tags across both stacks
    pub fn union_len(&self, other: &TechStack) -> usize {
        self.0.union(&other.0).count()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TechStack {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stack = TechStack::new();
        for tag in iter {
            stack.insert(tag.as_ref());
        }
        stack
    }
}

impl From<Vec<String>> for TechStack {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

/// Normalized description of a user's project
///
/// Owned by a single request and never mutated by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub scenario: String,
    pub technical_requirements: TechnicalRequirements,
    pub technology_stack: TechStack,
    pub city_size: CitySize,
    pub budget_range: BudgetRange,
    /// Effective per-request weights when the submission carried an override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<CriterionWeights>,
}

/// A catalog entry describing a previously built system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceCase {
    pub name: String,
    pub scenario: String,
    pub technical_requirements: TechnicalRequirements,
    pub technology_stack: TechStack,
    pub city_size: CitySize,
    pub budget_range: BudgetRange,
    /// Fields that failed to parse and were replaced with defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defaulted_fields: Vec<String>,
}

impl ReferenceCase {
    /// Whether any stored field was replaced with a default
    pub fn is_degraded(&self) -> bool {
        !self.defaulted_fields.is_empty()
    }
}
