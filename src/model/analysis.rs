use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Contract types the classifier is allowed to return.
///
/// The detection stage validates the raw model response against this closed
/// set; anything else is coerced to [`ContractType::Commercial`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "NDA")]
    Nda,
    #[serde(rename = "DPA")]
    Dpa,
    Employment,
    #[serde(rename = "MSA")]
    Msa,
    #[serde(rename = "SLA")]
    Sla,
    License,
    Purchase,
    Lease,
    Commercial,
}

impl ContractType {
    pub const ALL: [ContractType; 9] = [
        ContractType::Nda,
        ContractType::Dpa,
        ContractType::Employment,
        ContractType::Msa,
        ContractType::Sla,
        ContractType::License,
        ContractType::Purchase,
        ContractType::Lease,
        ContractType::Commercial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Nda => "NDA",
            ContractType::Dpa => "DPA",
            ContractType::Employment => "Employment",
            ContractType::Msa => "MSA",
            ContractType::Sla => "SLA",
            ContractType::License => "License",
            ContractType::Purchase => "Purchase",
            ContractType::Lease => "Lease",
            ContractType::Commercial => "Commercial",
        }
    }

    /// Validate a raw detection response against the closed set.
    ///
    /// Returns `Commercial` for anything outside it.
    pub fn from_response(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == trimmed)
            .unwrap_or(ContractType::Commercial)
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk severity. Unparsable values are coerced to `Medium`, never surfaced
/// as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    /// Lossy parse: anything that is not exactly high/medium/low
    /// (case-insensitive) becomes `Medium`.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => RiskLevel::High,
            "low" => RiskLevel::Low,
            _ => RiskLevel::Medium,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract clause identified by the extraction stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseInfo {
    /// Clause category key, e.g. "termination" or "limitation_of_liability".
    pub clause_type: String,
    /// Verbatim clause text as reported by the model (not validated against
    /// the source).
    pub text: String,
    /// Brief summary of what the clause covers.
    pub summary: String,
}

/// Risk assessment attached to a single clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

impl RiskAssessment {
    /// Default assessment used when the model responded but its output could
    /// not be decoded. The pipeline must keep going, so the clause is flagged
    /// for manual review at medium severity.
    pub fn unparsed() -> Self {
        Self {
            risk_level: RiskLevel::Medium,
            issues: vec!["Unable to parse detailed risk assessment".to_string()],
            recommendations: vec!["Review this clause manually".to_string()],
            explanation: "Automated risk assessment failed".to_string(),
        }
    }
}

/// A risk flagged by the whole-document review pass.
///
/// Produced independently of per-clause assessments; the two views may
/// overlap or disagree and are not reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskItem {
    /// The problematic text span from the contract.
    pub text: String,
    /// Description of the issue.
    pub issue: String,
    /// Suggested improvement.
    pub suggestion: String,
    pub risk_level: RiskLevel,
}

/// Aggregate result of the four analysis stages.
///
/// Built incrementally by the orchestrator; `clause_risks` keys are always a
/// subset of `clauses` keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub contract_type: ContractType,
    pub governing_law: String,
    pub clauses: BTreeMap<String, ClauseInfo>,
    pub clause_risks: BTreeMap<String, RiskAssessment>,
}

/// Combined output of the analysis orchestrator and the independent
/// whole-document risk review pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractReview {
    /// Normalized contract text the analysis ran over; the Markdown and
    /// highlighting artifacts render from this.
    pub text: String,
    pub analysis: AnalysisResult,
    pub risks: Vec<RiskItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_type_accepts_every_member_of_the_closed_set() {
        for t in ContractType::ALL {
            assert_eq!(ContractType::from_response(t.as_str()), t);
        }
    }

    #[test]
    fn contract_type_coerces_out_of_set_responses_to_commercial() {
        assert_eq!(
            ContractType::from_response("Franchise Agreement"),
            ContractType::Commercial
        );
        assert_eq!(ContractType::from_response(""), ContractType::Commercial);
        // Case must match the canonical label exactly.
        assert_eq!(ContractType::from_response("nda"), ContractType::Commercial);
    }

    #[test]
    fn contract_type_tolerates_surrounding_whitespace() {
        assert_eq!(ContractType::from_response("  NDA \n"), ContractType::Nda);
    }

    #[test]
    fn risk_level_parse_is_lossy() {
        assert_eq!(RiskLevel::parse_lossy("HIGH"), RiskLevel::High);
        assert_eq!(RiskLevel::parse_lossy(" low "), RiskLevel::Low);
        assert_eq!(RiskLevel::parse_lossy("medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse_lossy("severe"), RiskLevel::Medium);
        assert_eq!(RiskLevel::parse_lossy(""), RiskLevel::Medium);
    }

    #[test]
    fn risk_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"high\"");
    }
}
