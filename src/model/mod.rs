pub mod analysis;
pub mod config;
pub mod document;

pub use analysis::{
    AnalysisResult, ClauseInfo, ContractReview, ContractType, RiskAssessment, RiskItem, RiskLevel,
};
pub use config::{Config, LlmConfig};
pub use document::{Document, DocumentError, DocumentFormat};
