//! Per-attribute similarity functions
//!
//! All functions return a similarity score in range [0.0, 1.0] where 1.0 means identical.

use chainmatch_core::{BudgetRange, CitySize, SecurityLevel, TechStack, TechnicalRequirements};

/// Partial credit given when city sizes differ
pub const CITY_SIZE_MISMATCH_SCORE: f64 = 0.3;

const TPS_SHARE: f64 = 0.4;
const LATENCY_SHARE: f64 = 0.3;
const SECURITY_SHARE: f64 = 0.3;

const BUDGET_RANGE_SHARE: f64 = 0.7;
const BUDGET_CENTER_SHARE: f64 = 0.3;

/// Gaussian kernel `exp(-(x - y)^2 / (2 sigma^2))`
///
/// Symmetric in `x` and `y`, equal to 1 when they coincide.
#[inline]
pub fn gaussian_similarity(x: f64, y: f64, sigma: f64) -> f64 {
    let diff = x - y;
    (-(diff * diff) / (2.0 * sigma * sigma)).exp()
}

/// `1 - |rank(a) - rank(b)| / 2` over low=0, medium=1, high=2
#[inline]
pub fn security_similarity(a: SecurityLevel, b: SecurityLevel) -> f64 {
    let distance = (i16::from(a.rank()) - i16::from(b.rank())).abs();
    1.0 - f64::from(distance) / 2.0
}

/// Blend of throughput, latency and security similarity
pub fn technical_similarity(
    user: &TechnicalRequirements,
    case: &TechnicalRequirements,
    tps_sigma: f64,
    latency_sigma: f64,
) -> f64 {
    TPS_SHARE * gaussian_similarity(user.tps, case.tps, tps_sigma)
        + LATENCY_SHARE * gaussian_similarity(user.latency, case.latency, latency_sigma)
        + SECURITY_SHARE * security_similarity(user.security_level, case.security_level)
}

/// Jaccard index of two stacks, 0 when both are empty
pub fn tech_stack_similarity(a: &TechStack, b: &TechStack) -> f64 {
    let union = a.union_len(b);
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).len() as f64 / union as f64
}

/// 1.0 for equal sizes, flat partial credit otherwise
#[inline]
pub fn city_size_similarity(a: CitySize, b: CitySize) -> f64 {
    if a == b {
        1.0
    } else {
        CITY_SIZE_MISMATCH_SCORE
    }
}

/// Blend of interval overlap and center proximity
///
/// `range = overlap / (span_a + span_b - overlap)` (0 when the denominator
/// is 0) and `center = 1 - |c_a - c_b| / max(c_a, c_b, 1)`.
pub fn budget_similarity(a: &BudgetRange, b: &BudgetRange) -> f64 {
    let overlap = a.overlap_len(b);
    let denominator = a.span() + b.span() - overlap;
    let range_score = if denominator > 0.0 {
        overlap / denominator
    } else {
        0.0
    };

    let (center_a, center_b) = (a.center(), b.center());
    let scale = center_a.max(center_b).max(1.0);
    let center_score = (1.0 - (center_a - center_b).abs() / scale).clamp(0.0, 1.0);

    BUDGET_RANGE_SHARE * range_score + BUDGET_CENTER_SHARE * center_score
}

/// Cosine similarity of two vectors; 0 when either has zero magnitude
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
