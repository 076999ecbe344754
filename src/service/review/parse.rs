//! Line-oriented grammar for the risk-review response.
//!
//! A record starts at a line beginning with `Risk` that contains a `:`.
//! Within the line, fields are separated by the literal ` - ` delimiter, in
//! fixed order: the flagged text, then `Issue:`, `Suggestion:`, `Level:`.
//! A record is flushed when the next `Risk` line appears or input ends.

use crate::model::{RiskItem, RiskLevel};
use crate::service::preview;

/// An explicit all-clear from the model, matched case-insensitively.
const NO_RISKS_MARKER: &str = "no significant risks";

/// Parse the review response into risk records.
///
/// Empty responses and explicit "no significant risks" statements yield an
/// empty list. Any other non-empty response from which zero records are
/// recoverable yields exactly one synthesized general-review record, so
/// callers always receive actionable output.
pub(crate) fn parse_risk_list(response: &str) -> Vec<RiskItem> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.to_lowercase().contains(NO_RISKS_MARKER) {
        return Vec::new();
    }

    let mut risks = Vec::new();
    let mut current: Option<RiskItem> = None;

    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("Risk") && line.contains(':') {
            if let Some(risk) = current.take() {
                risks.push(risk);
            }

            let parts: Vec<&str> = line.split(" - ").collect();
            if parts.len() >= 4 {
                let text = parts[0].split_once(": ").map(|(_, t)| t).unwrap_or("");
                let issue = strip_label(parts[1], "Issue: ");
                let suggestion = strip_label(parts[2], "Suggestion: ");
                let level = strip_label(parts[3], "Level: ");

                current = Some(RiskItem {
                    text: text.trim().to_string(),
                    issue: issue.trim().to_string(),
                    suggestion: suggestion.trim().to_string(),
                    risk_level: RiskLevel::parse_lossy(level),
                });
            } else {
                tracing::debug!(
                    line = %preview(line),
                    "Risk line has fewer than four fields, skipping"
                );
            }
        }
    }

    if let Some(risk) = current.take() {
        risks.push(risk);
    }

    if risks.is_empty() {
        tracing::warn!(
            response = %preview(trimmed),
            "No risk records recoverable from non-empty response, synthesizing general record"
        );
        risks.push(general_review_item());
    }

    risks
}

fn strip_label<'a>(part: &'a str, label: &str) -> &'a str {
    part.strip_prefix(label).unwrap_or(part)
}

fn general_review_item() -> RiskItem {
    RiskItem {
        text: "General contract review".to_string(),
        issue: "Contract requires detailed legal review".to_string(),
        suggestion: "Have this contract reviewed by qualified legal counsel".to_string(),
        risk_level: RiskLevel::Medium,
    }
}
