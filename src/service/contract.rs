//! End-to-end contract review pipeline.
//!
//! Composes extraction, normalization, the four analysis stages, the
//! regulatory hint lookup, and the whole-document risk review into one
//! sequential flow. The only terminal failure is total extraction failure;
//! every downstream stage degrades to its safe default instead.

use std::sync::Arc;

use crate::extract;
use crate::model::{ContractReview, Document};
use crate::normalize::normalize;
use crate::service::hints::regulatory_hints;
use crate::service::llm::ContractModel;
use crate::service::{AnalysisService, RiskReviewService};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("no usable text could be extracted from {0}")]
    NoUsableText(String),
}

pub struct ContractService {
    analysis: AnalysisService,
    review: RiskReviewService,
}

impl ContractService {
    /// Build the pipeline from the two model handles. The handles are shared
    /// read-only capabilities; nothing here mutates them.
    pub fn new(analysis_model: Arc<dyn ContractModel>, review_model: Arc<dyn ContractModel>) -> Self {
        Self {
            analysis: AnalysisService::new(analysis_model),
            review: RiskReviewService::new(review_model),
        }
    }

    /// Run the full review over one document.
    pub async fn review_document(&self, doc: &Document) -> Result<ContractReview, PipelineError> {
        tracing::info!(
            document = %doc.name,
            id = %doc.id(),
            format = doc.format.as_str(),
            bytes = doc.bytes.len(),
            "Starting contract review"
        );

        let raw = extract::extract_text(doc);
        if raw.is_empty() {
            return Err(PipelineError::NoUsableText(doc.name.clone()));
        }
        let text = normalize(&raw);

        let analysis = self.analysis.analyze(&text).await;

        let hints = regulatory_hints(analysis.contract_type, &analysis.governing_law);
        let risks = self
            .review
            .review(&text, analysis.contract_type, &analysis.governing_law, &hints)
            .await;

        tracing::info!(
            document = %doc.name,
            contract_type = %analysis.contract_type,
            clauses = analysis.clauses.len(),
            risks = risks.len(),
            "Contract review complete"
        );

        Ok(ContractReview {
            text,
            analysis,
            risks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::llm::testing::MockModel;

    #[tokio::test]
    async fn empty_extraction_is_terminal_and_never_calls_the_model() {
        // Empty queues: had the orchestrator run, the stages would have
        // defaulted and the pipeline would return Ok instead of this error.
        let analysis = Arc::new(MockModel::with_responses([]));
        let review = Arc::new(MockModel::with_responses([]));
        let service = ContractService::new(analysis, review);

        let doc = Document::from_bytes("empty.txt", b"   \n ".to_vec()).unwrap();
        let err = service.review_document(&doc).await.unwrap_err();
        assert!(matches!(err, PipelineError::NoUsableText(ref name) if name == "empty.txt"));
    }
}
