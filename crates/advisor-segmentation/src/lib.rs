//! Text segmentation for language-model advice
//!
//! Model output format is not guaranteed, so free text is split by an
//! ordered cascade of heuristics that prefers the most structure-revealing
//! interpretation and degrades to the raw text instead of failing.
//!
//! - [`split_numbered_list`] turns a paragraph into list items.
//! - [`split_sections`] turns advisory prose into titled sections.
//! - [`format_legal_text`] and the citation finders support rendering of
//!   legal-analysis paragraphs.
//!
//! Each algorithm reports what it did through a [`SegmentationObserver`].

mod citations;
mod events;
mod legal_text;
mod list;
mod markers;
mod sections;

pub use citations::{
    Citation, CitationKind, TextSegment, find_case_citations, find_citations,
    find_statute_references, highlight_segments,
};
pub use events::{ListStage, NullObserver, SegmentationEvent, SegmentationObserver, TracingObserver};
pub use legal_text::format_legal_text;
pub use list::{CHUNK_WORDS, CHUNK_THRESHOLD_CHARS, split_numbered_list, split_numbered_list_with};
pub use markers::strip_leading_marker;
pub use sections::{
    SECTION_KEYWORDS, TITLE_MAX_CHARS, TITLE_MAX_TOKENS, is_section_title, split_sections,
    split_sections_with,
};
