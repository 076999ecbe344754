//! Decoding of model responses into typed records, with recovery.
//!
//! Models answer the clause-extraction and risk-assessment prompts with JSON
//! that is frequently wrapped in prose, fenced, or truncated. The decode
//! ladder here is: direct parse, then the substring between the first `{`
//! and the last `}`, then a typed default. Nothing in this module returns an
//! error to its caller.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{ClauseInfo, RiskAssessment, RiskLevel};
use crate::service::preview;

/// Slice the substring from the first `{` to the last `}`, if both exist.
fn embedded_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end >= start).then(|| &raw[start..=end])
}

/// Direct decode, then embedded-slice retry. `None` means both failed.
fn decode_with_recovery(stage: &str, raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(direct_err) => {
            if let Some(slice) = embedded_json(raw) {
                match serde_json::from_str(slice) {
                    Ok(value) => {
                        tracing::debug!(
                            stage = stage,
                            "Recovered JSON embedded in surrounding prose"
                        );
                        return Some(value);
                    }
                    Err(e) => {
                        tracing::warn!(
                            stage = stage,
                            error = %e,
                            response = %preview(raw),
                            "Embedded JSON slice also failed to decode"
                        );
                        return None;
                    }
                }
            }
            tracing::warn!(
                stage = stage,
                error = %direct_err,
                response = %preview(raw),
                "Response is not decodable JSON"
            );
            None
        }
    }
}

/// Parse the clause-extraction response into a clause map.
///
/// Entries whose value is not an object, or lacks a string `text` field, are
/// dropped individually; a response that cannot be decoded at all yields an
/// empty map.
pub(crate) fn parse_clause_map(raw: &str) -> BTreeMap<String, ClauseInfo> {
    let mut clauses = BTreeMap::new();

    let Some(value) = decode_with_recovery("clause_extraction", raw) else {
        return clauses;
    };
    let Some(entries) = value.as_object() else {
        tracing::warn!(
            stage = "clause_extraction",
            "Decoded JSON is not an object, returning no clauses"
        );
        return clauses;
    };

    for (clause_type, entry) in entries {
        let Some(fields) = entry.as_object() else {
            tracing::debug!(clause_type = %clause_type, "Dropping non-object clause entry");
            continue;
        };
        let Some(text) = fields.get("text").and_then(Value::as_str) else {
            tracing::debug!(clause_type = %clause_type, "Dropping clause entry without text");
            continue;
        };
        let summary = fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default();

        clauses.insert(
            clause_type.clone(),
            ClauseInfo {
                clause_type: clause_type.clone(),
                text: text.to_string(),
                summary: summary.to_string(),
            },
        );
    }

    clauses
}

/// Parse the risk-assessment response.
///
/// Missing fields default individually; an undecodable response yields
/// [`RiskAssessment::unparsed`] so the clause is still flagged for manual
/// review rather than failing the stage.
pub(crate) fn parse_risk_assessment(raw: &str) -> RiskAssessment {
    let Some(value) = decode_with_recovery("risk_assessment", raw) else {
        return RiskAssessment::unparsed();
    };
    let Some(fields) = value.as_object() else {
        tracing::warn!(
            stage = "risk_assessment",
            "Decoded JSON is not an object, using default assessment"
        );
        return RiskAssessment::unparsed();
    };

    RiskAssessment {
        risk_level: fields
            .get("risk_level")
            .and_then(Value::as_str)
            .map(RiskLevel::parse_lossy)
            .unwrap_or(RiskLevel::Medium),
        issues: string_list(fields.get("issues")),
        recommendations: string_list(fields.get("recommendations")),
        explanation: fields
            .get("explanation")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clause_map_decodes_a_plain_json_object() {
        let clauses = parse_clause_map(r#"{"termination": {"text": "T", "summary": "S"}}"#);
        assert_eq!(clauses.len(), 1);
        let clause = &clauses["termination"];
        assert_eq!(clause.clause_type, "termination");
        assert_eq!(clause.text, "T");
        assert_eq!(clause.summary, "S");
    }

    #[test]
    fn clause_map_recovers_json_wrapped_in_prose() {
        let raw = r#"Here are the clauses: {"liability": {"text": "L", "summary": "cap"}} Hope this helps."#;
        let clauses = parse_clause_map(raw);
        assert_eq!(clauses["liability"].text, "L");
    }

    #[test]
    fn clause_map_drops_entries_without_text_and_non_objects() {
        let raw = r#"{
            "termination": {"text": "T"},
            "liability": {"summary": "no text here"},
            "payment": "just a string"
        }"#;
        let clauses = parse_clause_map(raw);
        assert_eq!(clauses.len(), 1);
        assert_eq!(clauses["termination"].summary, "");
    }

    #[test]
    fn malformed_clause_response_yields_empty_map() {
        assert!(parse_clause_map("I could not find any clauses, sorry!").is_empty());
        assert!(parse_clause_map("{truncated: ").is_empty());
        assert!(parse_clause_map("[1, 2, 3]").is_empty());
    }

    #[test]
    fn risk_assessment_decodes_json_embedded_in_prose() {
        let raw = r#"Here is the result: {"risk_level": "high", "issues": ["one-sided"], "recommendations": ["add cap"], "explanation": "broad"} Thanks"#;
        let assessment = parse_risk_assessment(raw);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.issues, vec!["one-sided"]);
        assert_eq!(assessment.recommendations, vec!["add cap"]);
        assert_eq!(assessment.explanation, "broad");
    }

    #[test]
    fn risk_assessment_defaults_missing_fields() {
        let assessment = parse_risk_assessment(r#"{"risk_level": "low"}"#);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.issues.is_empty());
        assert!(assessment.recommendations.is_empty());
        assert_eq!(assessment.explanation, "");
    }

    #[test]
    fn risk_assessment_coerces_unknown_levels_to_medium() {
        let assessment = parse_risk_assessment(r#"{"risk_level": "catastrophic"}"#);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn undecodable_risk_assessment_falls_back_to_the_generic_default() {
        let assessment = parse_risk_assessment("no json at all");
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(
            assessment.issues,
            vec!["Unable to parse detailed risk assessment"]
        );
    }
}
