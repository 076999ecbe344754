//! Contract analysis orchestrator.
//!
//! Four sequential model-backed stages: type detection, governing-law
//! detection, clause extraction, and per-clause risk assessment. Each stage
//! is an independent invocation with no shared conversation state, and each
//! catches model and parse failures locally, substituting its safe default so
//! that no stage failure ever aborts the pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{AnalysisResult, ClauseInfo, ContractType, RiskAssessment};
use crate::service::hints::regulatory_hints;
use crate::service::llm::{ContractModel, ModelError};
use crate::service::{preview, truncate_chars};

mod parse;
pub mod prompts;

/// Input bound for the classification stages
const TYPE_DETECTION_BOUND: usize = 4000;
const GOVERNING_LAW_BOUND: usize = 4000;

/// Clause extraction sees more of the document
const CLAUSE_EXTRACTION_BOUND: usize = 6000;

/// Clauses at or below this length are too fragmentary to assess reliably
const MIN_ASSESSABLE_CLAUSE_CHARS: usize = 100;

const UNKNOWN_LAW: &str = "Unknown";

/// Service running the four analysis stages against one model handle.
pub struct AnalysisService {
    model: Arc<dyn ContractModel>,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn ContractModel>) -> Self {
        Self { model }
    }

    /// Run all four stages over normalized contract text.
    ///
    /// Always returns a complete result; stage failures degrade to defaults
    /// (`Commercial`, `Unknown`, empty clause map, per-clause fallback).
    pub async fn analyze(&self, text: &str) -> AnalysisResult {
        let contract_type = self.detect_contract_type(text).await;
        let governing_law = self.detect_governing_law(text).await;
        let hints = regulatory_hints(contract_type, &governing_law);
        let clauses = self.extract_key_clauses(text).await;

        let mut clause_risks = BTreeMap::new();
        for (clause_type, clause) in &clauses {
            if clause.text.chars().count() <= MIN_ASSESSABLE_CLAUSE_CHARS {
                tracing::debug!(
                    clause_type = %clause_type,
                    chars = clause.text.chars().count(),
                    "Clause too short for risk assessment, skipping"
                );
                continue;
            }
            if let Some(assessment) = self
                .assess_clause_risk(&clause.text, contract_type, &governing_law, &hints)
                .await
            {
                clause_risks.insert(clause_type.clone(), assessment);
            }
        }

        tracing::info!(
            contract_type = %contract_type,
            governing_law = %governing_law,
            clauses = clauses.len(),
            assessed = clause_risks.len(),
            "Contract analysis complete"
        );

        AnalysisResult {
            contract_type,
            governing_law,
            clauses,
            clause_risks,
        }
    }

    /// Stage 1: closed-list contract-type classification.
    pub async fn detect_contract_type(&self, text: &str) -> ContractType {
        let prompt =
            prompts::build_type_detection_prompt(truncate_chars(text, TYPE_DETECTION_BOUND));

        match self.invoke_stage("type_detection", &prompt).await {
            Ok(response) => {
                let detected = ContractType::from_response(&response);
                if detected == ContractType::Commercial
                    && response.trim() != ContractType::Commercial.as_str()
                {
                    tracing::warn!(
                        response = %preview(&response),
                        "Contract type outside the closed set, defaulting to Commercial"
                    );
                }
                detected
            }
            Err(_) => ContractType::Commercial,
        }
    }

    /// Stage 2: governing-law detection, free-text response.
    pub async fn detect_governing_law(&self, text: &str) -> String {
        let prompt = prompts::build_governing_law_prompt(truncate_chars(text, GOVERNING_LAW_BOUND));

        match self.invoke_stage("governing_law", &prompt).await {
            Ok(response) => {
                let law = response.trim();
                match law.to_lowercase().as_str() {
                    "unknown" | "not specified" | "not mentioned" | "none" => {
                        UNKNOWN_LAW.to_string()
                    }
                    _ => law.to_string(),
                }
            }
            Err(_) => UNKNOWN_LAW.to_string(),
        }
    }

    /// Stage 3: key-clause extraction into a clause-type keyed map.
    pub async fn extract_key_clauses(&self, text: &str) -> BTreeMap<String, ClauseInfo> {
        let prompt =
            prompts::build_clause_extraction_prompt(truncate_chars(text, CLAUSE_EXTRACTION_BOUND));

        match self.invoke_stage("clause_extraction", &prompt).await {
            Ok(response) => parse::parse_clause_map(&response),
            Err(_) => BTreeMap::new(),
        }
    }

    /// Stage 4: risk assessment for a single clause.
    ///
    /// A model failure skips the clause entirely (`None`); a parse failure
    /// still yields the default medium assessment. Either way, one clause's
    /// failure never affects the others.
    pub async fn assess_clause_risk(
        &self,
        clause_text: &str,
        contract_type: ContractType,
        governing_law: &str,
        hints: &[String],
    ) -> Option<RiskAssessment> {
        let prompt = prompts::build_risk_assessment_prompt(
            clause_text,
            contract_type,
            governing_law,
            hints,
        );

        match self.invoke_stage("risk_assessment", &prompt).await {
            Ok(response) => Some(parse::parse_risk_assessment(&response)),
            Err(_) => None,
        }
    }

    /// One model invocation with uniform stage logging. The returned error is
    /// already logged; callers only choose their default.
    async fn invoke_stage(&self, stage: &'static str, prompt: &str) -> Result<String, ModelError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            stage = stage,
            prompt_length = prompt.len(),
            "Initiating model call"
        );

        match self.model.invoke(prompt).await {
            Ok(response) => {
                tracing::info!(
                    stage = stage,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    response_length = response.len(),
                    "Model call completed"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    stage = stage,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Model call failed, stage will use its default"
                );
                Err(e)
            }
        }
    }
}
