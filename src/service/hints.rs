//! Static regulatory hint lookup.
//!
//! Type-specific hints first, then jurisdiction-specific, then general,
//! truncated to five. Pure rule concatenation; never fails.

use crate::model::ContractType;

const MAX_HINTS: usize = 5;

/// Regulatory considerations for a contract type and governing-law string.
pub fn regulatory_hints(contract_type: ContractType, governing_law: &str) -> Vec<String> {
    let mut hints: Vec<&str> = Vec::new();

    match contract_type {
        ContractType::Nda => hints.extend([
            "Ensure confidentiality period is reasonable and enforceable",
            "Consider mutual vs unilateral disclosure obligations",
            "Include proper exceptions for publicly available information",
        ]),
        ContractType::Employment => hints.extend([
            "Verify compliance with local employment laws",
            "Check non-compete clause enforceability",
            "Ensure proper termination procedures",
        ]),
        ContractType::Msa => hints.extend([
            "Include clear scope of work definitions",
            "Specify payment terms and dispute resolution",
            "Address intellectual property ownership",
        ]),
        _ => {}
    }

    if governing_law.contains("California") || governing_law.contains("United States") {
        hints.extend([
            "Consider California's strict non-compete restrictions",
            "Ensure compliance with US data privacy laws",
            "Review indemnification clause enforceability",
        ]);
    } else if governing_law.contains("United Kingdom") || governing_law.contains("UK") {
        hints.extend([
            "Consider GDPR compliance requirements",
            "Review unfair contract terms regulations",
            "Ensure proper governing law clauses",
        ]);
    }

    hints.extend([
        "Review limitation of liability clauses for reasonableness",
        "Ensure termination clauses are clearly defined",
        "Consider force majeure provisions",
    ]);

    hints
        .into_iter()
        .take(MAX_HINTS)
        .map(str::to_string)
        .collect()
}
