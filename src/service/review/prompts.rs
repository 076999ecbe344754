//! Prompt for the whole-document risk review pass.

use crate::model::ContractType;

/// Build the risk-review prompt. The response is expected as one `Risk N:`
/// line per finding, with ` - ` separated Issue/Suggestion/Level fields.
pub fn build_risk_review_prompt(
    text: &str,
    contract_type: ContractType,
    governing_law: &str,
    regulatory_hints: &[String],
) -> String {
    let hints = regulatory_hints
        .iter()
        .map(|hint| format!("- {hint}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an expert contract attorney. Analyze the following contract text and identify potential risks and issues.

Contract Type: {contract_type}
Governing Law: {governing_law}
Regulatory Hints: {hints}

Contract Text:
{text}

Please identify specific risks in the contract. For each risk, provide:
1. The exact problematic text from the contract
2. A clear description of the issue
3. A specific suggestion for improvement
4. A risk level (high, medium, or low)

Focus on:
- Unusual or one-sided terms
- Missing standard protections
- Overly broad language
- Compliance issues with the governing law
- Industry best practices

Return your analysis as a structured list of risks. If no significant risks are found, return an empty list.

Example format:
Risk 1: [problematic text] - Issue: [description] - Suggestion: [improvement] - Level: [high/medium/low]
"#
    )
}
