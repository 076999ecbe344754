//! End-to-end pipeline tests over a plain-text contract with a scripted model.

use std::sync::Arc;

use contract_review::model::{ContractType, Document, RiskLevel};
use contract_review::report::{self, ReviewReport};
use contract_review::service::llm::testing::MockModel;
use contract_review::service::{ContractService, PipelineError};

const SAMPLE_NDA: &str = "\
NON-DISCLOSURE AGREEMENT

This Non-Disclosure Agreement is entered into between TechCorp Inc. and DataSolutions LLC.

CONFIDENTIALITY

The Receiving Party agrees to hold and maintain the Confidential Information in strict confidence for a period of five years.

TERMINATION

This Agreement may be terminated by either party with 30 days written notice.

GOVERNING LAW

This Agreement shall be governed by and construed in accordance with the laws of the State of California.

LIABILITY

In no event shall either party be liable for any indirect, special, or consequential damages exceeding $100,000.
";

const CONFIDENTIALITY_CLAUSE: &str = "The Receiving Party agrees to hold and maintain the \
                                      Confidential Information in strict confidence for a period \
                                      of five years.";

#[tokio::test]
async fn full_review_over_a_plain_text_nda() {
    let clause_json = format!(
        r#"{{"confidentiality": {{"text": "{CONFIDENTIALITY_CLAUSE}", "summary": "Five year confidentiality obligation"}}}}"#
    );
    let analysis_model = MockModel::with_responses([
        Ok("NDA".to_string()),
        Ok("California".to_string()),
        Ok(clause_json),
        Ok(r#"{"risk_level": "medium", "issues": ["No exceptions for public information"], "recommendations": ["Add standard carve-outs"], "explanation": "Obligation is broad"}"#.to_string()),
    ]);
    let review_model = MockModel::with_responses([Ok(
        "Risk 1: damages exceeding $100,000 - Issue: Liability cap may be too low - Suggestion: Increase the cap - Level: high"
            .to_string(),
    )]);

    let service = ContractService::new(Arc::new(analysis_model), Arc::new(review_model));
    let doc = Document::from_bytes("sample_nda.txt", SAMPLE_NDA.as_bytes().to_vec()).unwrap();

    let review = service.review_document(&doc).await.unwrap();

    assert_eq!(review.analysis.contract_type, ContractType::Nda);
    assert_eq!(review.analysis.governing_law, "California");
    assert_eq!(review.analysis.clauses.len(), 1);
    assert_eq!(
        review.analysis.clauses["confidentiality"].summary,
        "Five year confidentiality obligation"
    );
    // The clause is over 100 chars, so it was assessed.
    assert_eq!(
        review.analysis.clause_risks["confidentiality"].risk_level,
        RiskLevel::Medium
    );

    assert_eq!(review.risks.len(), 1);
    assert_eq!(review.risks[0].risk_level, RiskLevel::High);

    // JSON artifact shape.
    let report = ReviewReport::new(&doc, &review, chrono::Utc::now());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["contract_analysis"]["contract_type"], "NDA");
    assert_eq!(json["contract_analysis"]["filename"], "sample_nda.txt");
    assert_eq!(
        json["contract_analysis"]["key_clauses"],
        serde_json::json!(["confidentiality"])
    );
    assert_eq!(json["summary"]["total_risks"], 1);
    assert_eq!(json["summary"]["high_risk_count"], 1);
    assert_eq!(json["risks"][0]["risk_level"], "high");

    // Markdown rendering promotes the ALL-CAPS section lines.
    let markdown = report::to_markdown(&review.text, Some("Contract Analysis: sample_nda.txt"));
    assert!(markdown.starts_with("# Contract Analysis: sample_nda.txt"));
    assert!(markdown.contains("## Termination\n\n"));
    assert!(markdown.contains("## Governing Law\n\n"));

    // The flagged span occurs verbatim, so it gets highlighted.
    let highlighted = report::highlight_risks(&review.text, &review.risks);
    assert!(highlighted.contains(">damages exceeding $100,000</mark>"));
}

#[tokio::test]
async fn stage_failures_degrade_but_the_pipeline_still_completes() {
    let analysis_model = MockModel::with_responses([
        Err("connection reset".to_string()),
        Err("connection reset".to_string()),
        Ok("I was unable to produce the JSON you asked for.".to_string()),
    ]);
    let review_model = MockModel::with_responses([Err("connection reset".to_string())]);

    let service = ContractService::new(Arc::new(analysis_model), Arc::new(review_model));
    let doc = Document::from_bytes("sample_nda.txt", SAMPLE_NDA.as_bytes().to_vec()).unwrap();

    let review = service.review_document(&doc).await.unwrap();

    assert_eq!(review.analysis.contract_type, ContractType::Commercial);
    assert_eq!(review.analysis.governing_law, "Unknown");
    assert!(review.analysis.clauses.is_empty());
    assert!(review.analysis.clause_risks.is_empty());
    // Review-call failure produces the generic fallback item.
    assert_eq!(review.risks.len(), 1);
    assert_eq!(review.risks[0].text, "Contract analysis error");
}

#[tokio::test]
async fn extraction_failure_is_terminal() {
    let analysis_model = MockModel::with_responses([]);
    let review_model = MockModel::with_responses([]);
    let service = ContractService::new(Arc::new(analysis_model), Arc::new(review_model));

    let doc = Document::from_bytes("broken.pdf", b"not really a pdf".to_vec()).unwrap();
    let err = service.review_document(&doc).await.unwrap_err();
    assert!(matches!(err, PipelineError::NoUsableText(ref name) if name == "broken.pdf"));
}
