pub mod analysis;
pub mod contract;
pub mod hints;
pub mod llm;
pub mod review;

pub use analysis::AnalysisService;
pub use contract::{ContractService, PipelineError};
pub use hints::regulatory_hints;
pub use llm::{ContractModel, LlmClient, ModelError};
pub use review::RiskReviewService;

/// Truncate to at most `max_chars` characters, always on a char boundary.
/// Applied before every model call to respect input-size limits.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Short raw-response excerpt for recovery logs.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "§§§§§";
        assert_eq!(truncate_chars(text, 2), "§§");
        assert_eq!(truncate_chars(text, 10), text);
    }
}
