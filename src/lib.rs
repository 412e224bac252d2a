//! legal-advisor - structured legal advice from language-model replies
//!
//! A user describes a legal issue, optionally answers clarifying questions,
//! and receives [`StructuredAdvice`]. Provider replies are not trusted to
//! follow the requested JSON contract: when they don't, advice is
//! synthesized from the free text, so analysis only fails for
//! configuration, provider, or session-data problems.
//!
//! # Quick Start
//!
//! ```no_run
//! use legal_advisor::{Advisor, AnswerSet, Config};
//!
//! # async fn run() -> Result<(), legal_advisor::AdviceError> {
//! let config = Config::discover()?;
//! let advisor = Advisor::from_config(&config)?;
//!
//! let issue = "임대인이 계약 종료 후 보증금을 돌려주지 않습니다";
//! let answers = AnswerSet::new().with("amount", "3000만원");
//! let advice = advisor.analyze(issue, &answers).await?;
//!
//! for item in &advice.recommendations {
//!     for step in legal_advisor::split_numbered_list(&item.content) {
//!         println!("- {}", legal_advisor::strip_leading_marker(&step));
//!     }
//! }
//!
//! let expert = advisor.expert_advice(issue, &advice).await?;
//! for section in advisor.expert_sections(&expert) {
//!     println!("{}", section.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Crates
//!
//! - `advisor-config` - configuration discovery and validation
//! - `advisor-codec` - reversible session value obfuscation (not encryption)
//! - `advisor-prompt-template` - provider prompts and the question catalog
//! - `advisor-llm` - provider backends
//! - `advisor-extraction` - provider reply normalization
//! - `advisor-segmentation` - list and section segmentation of free text
//! - `advisor-session` - session store flows

mod advisor;

pub use advisor::{Advisor, EXPERT_ADVICE_FALLBACK};

pub use advisor_config::{Config, ConfigSource, GenerationConfig, LoggingConfig, ProviderConfig};
pub use advisor_extraction::{ExtractionPath, Normalized, normalize, normalize_detailed};
pub use advisor_llm::{
    GeminiBackend, GenerationParams, LlmBackend, LlmInvocation, LlmResult, fetch_completion,
};
pub use advisor_prompt_template::{
    QUESTIONS, Question, QuestionKind, build_analysis_prompt, build_expert_prompt,
    default_selection, missing_required, validate_issue,
};
pub use advisor_segmentation::{
    Citation, CitationKind, ListStage, NullObserver, SegmentationEvent, SegmentationObserver,
    TextSegment, TracingObserver, find_citations, format_legal_text, highlight_segments,
    split_numbered_list, split_sections, strip_leading_marker,
};
pub use advisor_session::{MemoryStore, SessionStore};
pub use advisor_utils::error::{
    AdviceError, ConfigError, DecodeError, ErrorCategory, IssueError, LlmError, SessionError,
    UserFriendlyError,
};
pub use advisor_utils::logging::init_tracing;
pub use advisor_utils::types::{AdviceSection, AnswerSet, StructuredAdvice, TitledItem};

/// Session value codec.
pub mod codec {
    pub use advisor_codec::*;
}

/// List and section segmentation, with observer-taking variants.
pub mod segmentation {
    pub use advisor_segmentation::*;
}

/// Session read and write flows.
pub mod session {
    pub use advisor_session::*;
}
