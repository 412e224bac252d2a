//! Prompt construction for legal-advisor
//!
//! Builds the two provider prompts (structured analysis and follow-up
//! expert advice) and owns the catalog of clarifying questions asked
//! before analysis.

mod analysis;
mod expert;
mod questions;

pub use analysis::{NO_ADDITIONAL_INFO, NOT_SPECIFIED, build_analysis_prompt};
pub use expert::build_expert_prompt;
pub use questions::{
    MIN_ISSUE_CHARS, QUESTIONS, Question, QuestionKind, default_selection, missing_required,
    require_answers, validate_issue,
};
