//! Whole-document risk review pass.
//!
//! A single model call scans the full (length-capped) contract with the
//! detected type, governing law, and regulatory hints as context. Runs
//! independently of the per-clause assessments in the analysis stages; the
//! two views may overlap and are deliberately not reconciled.

use std::sync::Arc;

use crate::model::{ContractType, RiskItem, RiskLevel};
use crate::service::llm::ContractModel;
use crate::service::truncate_chars;

mod parse;
pub mod prompts;

/// Input bound for the review call
const REVIEW_BOUND: usize = 8000;

pub struct RiskReviewService {
    model: Arc<dyn ContractModel>,
}

impl RiskReviewService {
    pub fn new(model: Arc<dyn ContractModel>) -> Self {
        Self { model }
    }

    /// Scan the contract for flagged risk spans.
    ///
    /// Never fails: a model error degrades to a single generic risk item so
    /// callers always receive actionable output.
    pub async fn review(
        &self,
        text: &str,
        contract_type: ContractType,
        governing_law: &str,
        regulatory_hints: &[String],
    ) -> Vec<RiskItem> {
        let prompt = prompts::build_risk_review_prompt(
            truncate_chars(text, REVIEW_BOUND),
            contract_type,
            governing_law,
            regulatory_hints,
        );

        let start_time = std::time::Instant::now();
        tracing::debug!(
            contract_type = %contract_type,
            governing_law = %governing_law,
            prompt_length = prompt.len(),
            "Initiating risk review call"
        );

        match self.model.invoke(&prompt).await {
            Ok(response) => {
                let risks = parse::parse_risk_list(&response);
                tracing::info!(
                    elapsed_ms = start_time.elapsed().as_millis(),
                    risks = risks.len(),
                    "Risk review complete"
                );
                risks
            }
            Err(e) => {
                tracing::warn!(
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Risk review call failed, returning generic fallback item"
                );
                vec![error_fallback_item()]
            }
        }
    }
}

/// Returned when the review call itself fails, as opposed to returning
/// unparsable output.
fn error_fallback_item() -> RiskItem {
    RiskItem {
        text: "Contract analysis error".to_string(),
        issue: "Unable to complete automated analysis".to_string(),
        suggestion: "Please review this contract manually with legal counsel".to_string(),
        risk_level: RiskLevel::Medium,
    }
}
