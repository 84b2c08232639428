//! Attribute normalization
//!
//! Submissions and stored cases arrive with structured fields that may be
//! encoded as JSON text (`"{\"tps\": 3000, ...}"`), as delimited strings
//! (`"Java, Kafka"`) or as already-structured JSON values. This module turns
//! both shapes into canonical [`Query`] and [`ReferenceCase`] records.
//!
//! The two entry points differ in failure policy:
//! - [`normalize_submission`] fails with [`Error::InvalidInputFormat`] on any
//!   undecodable field.
//! - [`normalize_case`] never fails. A malformed or missing field is
//!   replaced with its default, logged as a [`Error::CaseParseError`] and
//!   recorded in [`ReferenceCase::defaulted_fields`].

use crate::{
    BudgetRange, CitySize, CriterionWeights, Error, Query, ReferenceCase, Result, SecurityLevel,
    TechStack, TechnicalRequirements,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user submission as received from the transport layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default, alias = "applicationScenarios")]
    pub application_scenarios: String,
    #[serde(default, alias = "technicalRequirements")]
    pub technical_requirements: Option<Value>,
    #[serde(default, alias = "technologyStack")]
    pub technology_stack: Option<Value>,
    #[serde(default, alias = "citySize")]
    pub city_size: Option<String>,
    #[serde(default, alias = "budgetRange")]
    pub budget_range: Option<Value>,
    /// Optional per-request weight override keyed by criterion name
    #[serde(default)]
    pub weights: Option<AHashMap<String, f64>>,
}

/// A stored reference case as read from persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCase {
    #[serde(default, alias = "title")]
    pub name: String,
    #[serde(default)]
    pub application_scenarios: String,
    #[serde(default)]
    pub technical_requirements: Option<Value>,
    #[serde(default)]
    pub technology_stack: Option<Value>,
    #[serde(default)]
    pub city_size: Option<String>,
    #[serde(default)]
    pub budget_range: Option<Value>,
}

/// Normalize a submission into a [`Query`]
///
/// `base_weights` are the configured defaults an override is merged into.
pub fn normalize_submission(raw: &RawSubmission, base_weights: &CriterionWeights) -> Result<Query> {
    let weights = match &raw.weights {
        Some(overrides) => Some(base_weights.with_overrides(overrides)?),
        None => None,
    };

    let technical_requirements = match &raw.technical_requirements {
        Some(value) => decode_requirements(value).map_err(|reason| {
            Error::InvalidInputFormat(format!("technical_requirements: {reason}"))
        })?,
        None => {
            return Err(Error::InvalidInputFormat(
                "technical_requirements is required".to_string(),
            ))
        }
    };

    let technology_stack = match &raw.technology_stack {
        Some(value) => decode_stack(value)
            .map_err(|reason| Error::InvalidInputFormat(format!("technology_stack: {reason}")))?,
        None => TechStack::new(),
    };

    let city_size = match &raw.city_size {
        Some(text) => text.parse()?,
        None => CitySize::default(),
    };

    let budget_range = match &raw.budget_range {
        Some(value) => {
            let (min, max) = decode_budget_pair(value)
                .map_err(|reason| Error::InvalidInputFormat(format!("budget_range: {reason}")))?;
            BudgetRange::new(min, max)?
        }
        None => BudgetRange::default(),
    };

    Ok(Query {
        scenario: raw.application_scenarios.trim().to_string(),
        technical_requirements,
        technology_stack,
        city_size,
        budget_range,
        weights,
    })
}

/// Normalize a stored case, substituting defaults for malformed fields
pub fn normalize_case(raw: &RawCase) -> ReferenceCase {
    let mut defaulted_fields = Vec::new();
    let mut degrade = |field: &'static str, reason: String| {
        let err = Error::CaseParseError {
            case: raw.name.clone(),
            field,
            reason,
        };
        tracing::warn!(case = %raw.name, field, error = %err, "using default for malformed case field");
        defaulted_fields.push(field.to_string());
    };

    let scenario = raw.application_scenarios.trim().to_string();
    if scenario.is_empty() {
        degrade("application_scenarios", "missing or empty".to_string());
    }

    let technical_requirements = match raw.technical_requirements.as_ref().map(decode_requirements) {
        Some(Ok(requirements)) => requirements,
        Some(Err(reason)) => {
            degrade("technical_requirements", reason);
            TechnicalRequirements::default()
        }
        None => {
            degrade("technical_requirements", "missing".to_string());
            TechnicalRequirements::default()
        }
    };

    let technology_stack = match raw.technology_stack.as_ref().map(decode_stack) {
        Some(Ok(stack)) => stack,
        Some(Err(reason)) => {
            degrade("technology_stack", reason);
            TechStack::new()
        }
        None => {
            degrade("technology_stack", "missing".to_string());
            TechStack::new()
        }
    };

    let city_size = match raw.city_size.as_deref().map(str::parse::<CitySize>) {
        Some(Ok(size)) => size,
        Some(Err(err)) => {
            degrade("city_size", err.to_string());
            CitySize::default()
        }
        None => {
            degrade("city_size", "missing".to_string());
            CitySize::default()
        }
    };

    let budget_range = match raw.budget_range.as_ref().map(decode_budget_pair) {
        Some(Ok((min, max))) => {
            let (min, max) = if min > max {
                degrade("budget_range", format!("inverted range [{min}, {max}], swapped"));
                (max, min)
            } else {
                (min, max)
            };
            match BudgetRange::new(min, max) {
                Ok(range) => range,
                Err(err) => {
                    degrade("budget_range", err.to_string());
                    BudgetRange::default()
                }
            }
        }
        Some(Err(reason)) => {
            degrade("budget_range", reason);
            BudgetRange::default()
        }
        None => {
            degrade("budget_range", "missing".to_string());
            BudgetRange::default()
        }
    };

    ReferenceCase {
        name: raw.name.clone(),
        scenario,
        technical_requirements,
        technology_stack,
        city_size,
        budget_range,
        defaulted_fields,
    }
}

/// Normalize a whole catalog, preserving catalog order
pub fn normalize_catalog(raw: &[RawCase]) -> Vec<ReferenceCase> {
    raw.iter().map(normalize_case).collect()
}

/// Decode a field that may be JSON text into a JSON value
fn decode_structured(value: &Value) -> std::result::Result<Value, String> {
    match value {
        Value::String(text) => {
            serde_json::from_str(text).map_err(|e| format!("not valid JSON text ({e})"))
        }
        other => Ok(other.clone()),
    }
}

fn number(value: &Value, field: &str) -> std::result::Result<f64, String> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(format!("'{field}' must be a number, got {value}")),
    }
}

fn decode_requirements(value: &Value) -> std::result::Result<TechnicalRequirements, String> {
    let decoded = decode_structured(value)?;
    let map = decoded
        .as_object()
        .ok_or_else(|| format!("expected an object, got {decoded}"))?;

    let tps = number(map.get("tps").ok_or("missing 'tps'")?, "tps")?;
    let latency = number(map.get("latency").ok_or("missing 'latency'")?, "latency")?;
    if tps < 0.0 || latency < 0.0 {
        return Err(format!("tps and latency must be non-negative, got {tps} and {latency}"));
    }
    let security_level = map
        .get("security_level")
        .ok_or("missing 'security_level'")?
        .as_str()
        .ok_or("'security_level' must be a string")?
        .parse::<SecurityLevel>()
        .map_err(|e| e.to_string())?;

    Ok(TechnicalRequirements {
        tps,
        latency,
        security_level,
    })
}

fn decode_stack(value: &Value) -> std::result::Result<TechStack, String> {
    match value {
        Value::String(text) if text.trim_start().starts_with('[') => {
            let decoded: Value =
                serde_json::from_str(text).map_err(|e| format!("not valid JSON text ({e})"))?;
            decode_stack(&decoded)
        }
        Value::String(text) => Ok(TechStack::parse_delimited(text)),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| format!("stack entries must be strings, got {item}"))
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(|tags| tags.into_iter().collect()),
        other => Err(format!("expected a delimited string or a list, got {other}")),
    }
}

/// Decode a budget as `[min, max]`, `{"min", "max"}` or text like `"1000-5000"`
fn decode_budget_pair(value: &Value) -> std::result::Result<(f64, f64), String> {
    let decoded = match value {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(v) => v,
            Err(_) => return parse_budget_text(text),
        },
        other => other.clone(),
    };

    match &decoded {
        Value::Array(items) if items.len() == 2 => {
            Ok((number(&items[0], "min")?, number(&items[1], "max")?))
        }
        Value::Object(map) => Ok((
            number(map.get("min").ok_or("missing 'min'")?, "min")?,
            number(map.get("max").ok_or("missing 'max'")?, "max")?,
        )),
        other => Err(format!("expected a numeric [min, max] pair, got {other}")),
    }
}

fn parse_budget_text(text: &str) -> std::result::Result<(f64, f64), String> {
    let mut parts = text.split(|c| c == '-' || c == ',').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(min), Some(max), None) => match (min.parse::<f64>(), max.parse::<f64>()) {
            (Ok(min), Ok(max)) if min.is_finite() && max.is_finite() => Ok((min, max)),
            _ => Err(format!("'{text}' is not a numeric range")),
        },
        _ => Err(format!("'{text}' is not a numeric range")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> RawSubmission {
        RawSubmission {
            application_scenarios: " Cross-organization supply chain ".to_string(),
            technical_requirements: Some(json!(
                r#"{"tps": 3000, "latency": 2, "security_level": "High"}"#
            )),
            technology_stack: Some(json!("Java, Kafka, ,fabric")),
            city_size: Some("Large".to_string()),
            budget_range: Some(json!("[100000, 500000]")),
            weights: None,
        }
    }

    #[test]
    fn test_string_encoded_fields_decoded() {
        let query = normalize_submission(&submission(), &CriterionWeights::default()).unwrap();
        assert_eq!(query.scenario, "Cross-organization supply chain");
        assert_eq!(query.technical_requirements.tps, 3000.0);
        assert_eq!(query.technical_requirements.security_level, SecurityLevel::High);
        assert_eq!(query.technology_stack.len(), 3);
        assert!(query.technology_stack.contains("java"));
        assert_eq!(query.city_size, CitySize::Large);
        assert_eq!(query.budget_range.max(), 500000.0);
        assert!(query.weights.is_none());
    }

    #[test]
    fn test_structured_fields_accepted() {
        let mut raw = submission();
        raw.technical_requirements = Some(json!({"tps": 10, "latency": 0.5, "security_level": "low"}));
        raw.technology_stack = Some(json!(["Rust", "IPFS"]));
        raw.budget_range = Some(json!({"min": 1, "max": 2}));
        let query = normalize_submission(&raw, &CriterionWeights::default()).unwrap();
        assert_eq!(query.technical_requirements.latency, 0.5);
        assert!(query.technology_stack.contains("ipfs"));
        assert_eq!(query.budget_range.min(), 1.0);
    }

    #[test]
    fn test_budget_text_range() {
        let mut raw = submission();
        raw.budget_range = Some(json!("1000 - 5000"));
        let query = normalize_submission(&raw, &CriterionWeights::default()).unwrap();
        assert_eq!(query.budget_range.min(), 1000.0);
        assert_eq!(query.budget_range.max(), 5000.0);
    }

    #[test]
    fn test_missing_required_subfield_is_invalid_input() {
        let mut raw = submission();
        raw.technical_requirements = Some(json!({"tps": 10, "latency": 1}));
        let err = normalize_submission(&raw, &CriterionWeights::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInputFormat(ref msg) if msg.contains("security_level")));

        raw.technical_requirements = None;
        assert!(matches!(
            normalize_submission(&raw, &CriterionWeights::default()),
            Err(Error::InvalidInputFormat(_))
        ));
    }

    #[test]
    fn test_undecodable_text_is_invalid_input() {
        let mut raw = submission();
        raw.technical_requirements = Some(json!("{tps: oops"));
        assert!(matches!(
            normalize_submission(&raw, &CriterionWeights::default()),
            Err(Error::InvalidInputFormat(_))
        ));

        let mut raw = submission();
        raw.budget_range = Some(json!("[500, 100]"));
        assert!(matches!(
            normalize_submission(&raw, &CriterionWeights::default()),
            Err(Error::InvalidInputFormat(_))
        ));
    }

    #[test]
    fn test_weight_override_validated_before_scoring() {
        let mut raw = submission();
        raw.weights = Some(
            [("scenario".to_string(), 0.5), ("budget".to_string(), 0.6)]
                .into_iter()
                .collect(),
        );
        assert!(matches!(
            normalize_submission(&raw, &CriterionWeights::default()),
            Err(Error::WeightValidationError(_))
        ));
    }

    #[test]
    fn test_camel_case_submission_accepted() {
        let raw: RawSubmission = serde_json::from_value(json!({
            "applicationScenarios": "smart parking",
            "technicalRequirements": "{\"tps\": 100, \"latency\": 3, \"security_level\": \"medium\"}",
            "technologyStack": "Go",
            "citySize": "small",
            "budgetRange": "[0, 1000]"
        }))
        .unwrap();
        let query = normalize_submission(&raw, &CriterionWeights::default()).unwrap();
        assert_eq!(query.scenario, "smart parking");
        assert_eq!(query.city_size, CitySize::Small);
    }

    #[test]
    fn test_malformed_case_fields_default_and_are_recorded() {
        let raw = RawCase {
            name: "Broken".to_string(),
            application_scenarios: "toll collection".to_string(),
            technical_requirements: Some(json!("not json")),
            technology_stack: Some(json!(42)),
            city_size: Some("gigantic".to_string()),
            budget_range: Some(json!("cheap")),
        };
        let case = normalize_case(&raw);
        assert_eq!(case.technical_requirements, TechnicalRequirements::default());
        assert!(case.technology_stack.is_empty());
        assert_eq!(case.city_size, CitySize::Medium);
        assert_eq!(case.budget_range, BudgetRange::default());
        assert_eq!(
            case.defaulted_fields,
            vec!["technical_requirements", "technology_stack", "city_size", "budget_range"]
        );
        assert!(case.is_degraded());
    }

    #[test]
    fn test_inverted_case_budget_swapped() {
        let raw = RawCase {
            name: "Inverted".to_string(),
            application_scenarios: "energy trading".to_string(),
            technical_requirements: Some(json!({"tps": 1, "latency": 1, "security_level": "low"})),
            technology_stack: Some(json!("rust")),
            city_size: Some("small".to_string()),
            budget_range: Some(json!([900, 100])),
        };
        let case = normalize_case(&raw);
        assert_eq!(case.budget_range.min(), 100.0);
        assert_eq!(case.budget_range.max(), 900.0);
        assert_eq!(case.defaulted_fields, vec!["budget_range"]);
    }

    #[test]
    fn test_well_formed_case_not_degraded() {
        let raw: RawCase = serde_json::from_value(json!({
            "title": "Fabric land registry",
            "application_scenarios": "land registry with audit trail",
            "technical_requirements": "{\"tps\": 500, \"latency\": 2, \"security_level\": \"high\"}",
            "technology_stack": "Go, Hyperledger Fabric",
            "city_size": "medium",
            "budget_range": "[200000, 400000]"
        }))
        .unwrap();
        let case = normalize_case(&raw);
        assert_eq!(case.name, "Fabric land registry");
        assert!(!case.is_degraded());
        assert!(case.technology_stack.contains("hyperledger fabric"));
    }

    #[test]
    fn test_missing_stack_and_blank_scenario_are_recorded() {
        let raw = RawCase {
            name: "Sparse".to_string(),
            application_scenarios: "   ".to_string(),
            technical_requirements: Some(json!({"tps": 10, "latency": 1, "security_level": "low"})),
            technology_stack: None,
            city_size: Some("small".to_string()),
            budget_range: Some(json!([1, 2])),
        };
        let case = normalize_case(&raw);
        assert_eq!(case.scenario, "");
        assert!(case.technology_stack.is_empty());
        assert_eq!(case.defaulted_fields, vec!["application_scenarios", "technology_stack"]);
    }

    #[test]
    fn test_empty_stack_list_is_not_degraded() {
        let raw = RawCase {
            name: "No stack".to_string(),
            application_scenarios: "toll collection".to_string(),
            technical_requirements: Some(json!({"tps": 10, "latency": 1, "security_level": "low"})),
            technology_stack: Some(json!([])),
            city_size: Some("small".to_string()),
            budget_range: Some(json!([1, 2])),
        };
        assert!(!normalize_case(&raw).is_degraded());
    }
}
