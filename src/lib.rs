//! LLM-based contract analysis pipeline.
//!
//! Extracts text from uploaded contract documents through a multi-backend
//! fallback chain, normalizes it, then runs sequential model-backed stages
//! (type detection, governing-law detection, clause extraction, per-clause
//! risk assessment) plus an independent whole-document risk review. Model and
//! parse failures degrade to typed defaults; only total extraction failure is
//! terminal.

pub mod extract;
pub mod model;
pub mod normalize;
pub mod report;
pub mod service;
