//! Response normalization
//!
//! Turns raw provider text into a complete [`StructuredAdvice`]. A JSON
//! payload is used when one can be found and parsed; otherwise advice is
//! synthesized from the text. Normalization never fails: every path ends in
//! the same validation step that fills defaults for missing fields.

mod candidate;
mod payload;
mod synthesis;

use tracing::debug;

use advisor_utils::types::StructuredAdvice;

pub use candidate::{Candidate, ExtractionPath, extract_candidate};
pub use payload::{
    DEFAULT_ANALYSIS, DEFAULT_CATEGORY, DEFAULT_NEXT_STEPS, DEFAULT_RECOMMENDATION,
    DEFAULT_SUMMARY,
};
pub use synthesis::{
    ERROR_MARKERS, SHORT_TEXT_CHARS, error_shape_advice, infer_category, is_error_shape,
    synthesize_from_text,
};

/// Result of [`normalize_detailed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub advice: StructuredAdvice,
    /// Where the JSON candidate came from.
    pub path: ExtractionPath,
    /// True when advice was synthesized from text instead of parsed.
    pub synthesized: bool,
}

/// Normalize raw provider text into structured advice.
#[must_use]
pub fn normalize(raw: &str, issue: &str) -> StructuredAdvice {
    normalize_detailed(raw, issue).advice
}

/// [`normalize`], also reporting how the advice was obtained.
///
/// 1. Pick a candidate: a fenced code block, else the outermost brace
///    span, else the trimmed text.
/// 2. A candidate not shaped like `{...}` is synthesized from directly.
/// 3. Otherwise it is parsed as JSON; a parse failure synthesizes from the
///    full raw text.
#[must_use]
pub fn normalize_detailed(raw: &str, issue: &str) -> Normalized {
    let candidate = extract_candidate(raw);

    let (advice, synthesized) = if !candidate.is_json_shaped() {
        (synthesize_from_text(candidate.text, issue), true)
    } else {
        match payload::parse(candidate.text) {
            Ok(payload) => (payload.finalize(), false),
            Err(err) => {
                debug!(error = %err, "Provider JSON did not parse, synthesizing from text");
                (synthesize_from_text(raw, issue), true)
            }
        }
    };

    debug!(
        path = %candidate.path,
        synthesized,
        category = %advice.category,
        "Normalized provider response"
    );

    Normalized {
        advice,
        path: candidate.path,
        synthesized,
    }
}
