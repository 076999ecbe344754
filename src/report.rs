//! Report artifacts the surrounding UI consumes.
//!
//! The core guarantees three shapes: a JSON analysis document, a Markdown
//! rendering of the normalized text with heuristic heading promotion, and an
//! HTML highlighting of flagged risk spans over the source text.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::model::{ContractReview, ContractType, Document, RiskItem, RiskLevel};

/// JSON analysis artifact.
#[derive(Debug, Serialize)]
pub struct ReviewReport {
    pub contract_analysis: ContractAnalysisSection,
    pub risks: Vec<RiskItem>,
    pub summary: RiskSummary,
}

#[derive(Debug, Serialize)]
pub struct ContractAnalysisSection {
    pub filename: String,
    pub contract_type: ContractType,
    pub governing_law: String,
    /// Clause-type keys of the extracted clauses.
    pub key_clauses: Vec<String>,
    pub analysis_date: DateTime<Utc>,
}

/// Risk counts by level.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct RiskSummary {
    pub total_risks: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
}

impl ReviewReport {
    pub fn new(document: &Document, review: &ContractReview, analysis_date: DateTime<Utc>) -> Self {
        Self {
            contract_analysis: ContractAnalysisSection {
                filename: document.name.clone(),
                contract_type: review.analysis.contract_type,
                governing_law: review.analysis.governing_law.clone(),
                key_clauses: review.analysis.clauses.keys().cloned().collect(),
                analysis_date,
            },
            risks: review.risks.clone(),
            summary: summarize(&review.risks),
        }
    }
}

/// Count risks by severity level.
pub fn summarize(risks: &[RiskItem]) -> RiskSummary {
    let mut summary = RiskSummary {
        total_risks: risks.len(),
        ..RiskSummary::default()
    };
    for risk in risks {
        match risk.risk_level {
            RiskLevel::High => summary.high_risk_count += 1,
            RiskLevel::Medium => summary.medium_risk_count += 1,
            RiskLevel::Low => summary.low_risk_count += 1,
        }
    }
    summary
}

fn numbered_heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.?\s+[A-Z]").expect("static regex"))
}

/// Render normalized text as Markdown with heuristic heading promotion.
///
/// Short ALL-CAPS paragraphs become title-cased `##` headings; paragraphs
/// opening with a section number and an uppercase letter become `###`.
pub fn to_markdown(text: &str, title: Option<&str>) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut markdown = String::new();
    if let Some(title) = title {
        markdown.push_str(&format!("# {title}\n\n"));
    }

    for paragraph in text.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if is_caps_heading(paragraph) {
            markdown.push_str(&format!("## {}\n\n", title_case(paragraph)));
        } else if numbered_heading_re().is_match(paragraph) {
            markdown.push_str(&format!("### {paragraph}\n\n"));
        } else {
            markdown.push_str(&format!("{paragraph}\n\n"));
        }
    }

    markdown
}

/// Short, all-uppercase, not sentence-terminated: treat as a heading.
fn is_caps_heading(paragraph: &str) -> bool {
    paragraph.chars().count() < 100
        && paragraph.chars().any(char::is_alphabetic)
        && !paragraph.chars().any(char::is_lowercase)
        && !paragraph.ends_with('.')
}

/// Uppercase each letter that opens a word (any non-letter is a boundary),
/// lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn highlight_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => "#ffcdd2",
        RiskLevel::Medium => "#ffe0b2",
        RiskLevel::Low => "#f3e5f5",
    }
}

/// Wrap each risk's first verbatim occurrence in a colored `<mark>` span.
///
/// Replacements are applied in descending order of first-occurrence offset so
/// an earlier replacement never shifts the recorded offset of a later one.
/// Risks whose text does not occur verbatim in the source are skipped here
/// but stay in the report output.
pub fn highlight_risks(text: &str, risks: &[RiskItem]) -> String {
    let mut spans: Vec<(usize, &RiskItem)> = risks
        .iter()
        .filter(|risk| !risk.text.is_empty())
        .filter_map(|risk| text.find(&risk.text).map(|offset| (offset, risk)))
        .collect();

    spans.sort_by(|a, b| b.0.cmp(&a.0));
    // Two risks flagging the identical span would otherwise mark a mark.
    spans.dedup_by_key(|(offset, _)| *offset);

    let mut highlighted = text.to_string();
    for (offset, risk) in spans {
        let mark = format!(
            "<mark style=\"background-color: {}; padding: 2px 4px; border-radius: 3px;\">{}</mark>",
            highlight_color(risk.risk_level),
            risk.text
        );
        highlighted.replace_range(offset..offset + risk.text.len(), &mark);
    }

    highlighted
}
