//! Titled-section segmentation of advisory prose

use advisor_utils::types::AdviceSection;

use crate::events::{SegmentationEvent, SegmentationObserver, TracingObserver};

/// Topic keywords that mark a line as a candidate section title, in
/// priority order.
pub const SECTION_KEYWORDS: [&str; 12] = [
    "성공 가능성",
    "위험 요소",
    "법원",
    "상대방",
    "전략적",
    "접근법",
    "협상",
    "소송",
    "중요한",
    "고려사항",
    "행동 계획",
    "법적 대응",
];

/// Title lines must be shorter than this many characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Title lines without `:` or `.` must have fewer space-separated tokens
/// than this. Runs of spaces count as empty tokens.
pub const TITLE_MAX_TOKENS: usize = 10;

/// Whether a (trimmed) line is a candidate section title.
#[must_use]
pub fn is_section_title(line: &str) -> bool {
    let lowered = line.to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()))
        && line.chars().count() < TITLE_MAX_CHARS
        && (line.contains(':')
            || line.contains('.')
            || line.trim().split(' ').count() < TITLE_MAX_TOKENS)
}

/// Split advisory prose into titled sections, reporting via `tracing`.
#[must_use]
pub fn split_sections(text: &str) -> Vec<AdviceSection> {
    split_sections_with(text, &TracingObserver)
}

/// Split advisory prose into titled sections.
///
/// Lines are trimmed and blank lines dropped. A title line closes the
/// current section when it already has content; otherwise it replaces the
/// pending title. Every other line is content of the current section.
/// When no section gets any content, the result is one untitled section
/// holding every line, which is empty for whitespace-only text. Empty input
/// yields no sections.
pub fn split_sections_with(text: &str, observer: &dyn SegmentationObserver) -> Vec<AdviceSection> {
    if text.is_empty() {
        observer.on_event(&SegmentationEvent::Sections {
            count: 0,
            fallback: false,
        });
        return Vec::new();
    }
    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut sections = Vec::new();
    let mut current = AdviceSection::default();
    for line in &lines {
        if is_section_title(line) {
            if current.content.is_empty() {
                current.title = (*line).to_string();
            } else {
                sections.push(std::mem::replace(
                    &mut current,
                    AdviceSection {
                        title: (*line).to_string(),
                        content: Vec::new(),
                    },
                ));
            }
        } else {
            current.content.push((*line).to_string());
        }
    }
    if !current.content.is_empty() {
        sections.push(current);
    }

    let fallback = sections.is_empty();
    if fallback {
        sections.push(AdviceSection::untitled(
            lines.into_iter().map(str::to_string).collect(),
        ));
    }

    observer.on_event(&SegmentationEvent::Sections {
        count: sections.len(),
        fallback,
    });
    sections
}
