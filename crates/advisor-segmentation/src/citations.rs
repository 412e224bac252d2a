//! Statute and case-number detection for highlighting

use regex::Regex;
use std::sync::LazyLock;

static STATUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[가-힣]+\s*제[0-9]+조(?:\s*제[0-9]+항)?(?:\s*제[0-9]+호)?").unwrap()
});

static CASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"대법원\s*[0-9]+\s*[가-힣]+\s*[0-9]+|서울고등법원\s*[0-9]+\s*[가-힣]+\s*[0-9]+")
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationKind {
    /// `민법 제750조`, optionally with `제N항` / `제N호`
    Statute,
    /// `대법원 2019다12345`, `서울고등법원 ...`
    Case,
}

/// A citation found in text; `start..end` is a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub kind: CitationKind,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// A run of text that is either plain or one citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSegment<'a> {
    pub text: &'a str,
    pub citation: Option<CitationKind>,
}

fn find(pattern: &Regex, kind: CitationKind, text: &str) -> Vec<Citation> {
    pattern
        .find_iter(text)
        .map(|m| Citation {
            kind,
            start: m.start(),
            end: m.end(),
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Statute references, left to right, non-overlapping.
#[must_use]
pub fn find_statute_references(text: &str) -> Vec<Citation> {
    find(&STATUTE, CitationKind::Statute, text)
}

/// Court case numbers, left to right, non-overlapping.
#[must_use]
pub fn find_case_citations(text: &str) -> Vec<Citation> {
    find(&CASE, CitationKind::Case, text)
}

/// Both kinds merged by position. Where spans overlap the earlier one
/// wins, and case numbers win ties.
#[must_use]
pub fn find_citations(text: &str) -> Vec<Citation> {
    let mut all = find_case_citations(text);
    all.extend(find_statute_references(text));
    all.sort_by_key(|c| (c.start, c.kind == CitationKind::Statute));

    let mut merged: Vec<Citation> = Vec::with_capacity(all.len());
    for citation in all {
        if merged.last().is_none_or(|last| citation.start >= last.end) {
            merged.push(citation);
        }
    }
    merged
}

/// Split `text` into plain and highlighted segments.
///
/// `citations` must be ordered and non-overlapping, as returned by the
/// finders; spans out of order or not on character boundaries are skipped.
#[must_use]
pub fn highlight_segments<'a>(text: &'a str, citations: &[Citation]) -> Vec<TextSegment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for citation in citations {
        if citation.start < cursor
            || citation.end > text.len()
            || citation.start >= citation.end
            || !text.is_char_boundary(citation.start)
            || !text.is_char_boundary(citation.end)
        {
            continue;
        }
        if citation.start > cursor {
            segments.push(TextSegment {
                text: &text[cursor..citation.start],
                citation: None,
            });
        }
        segments.push(TextSegment {
            text: &text[citation.start..citation.end],
            citation: Some(citation.kind),
        });
        cursor = citation.end;
    }
    if cursor < text.len() {
        segments.push(TextSegment {
            text: &text[cursor..],
            citation: None,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statute_references() {
        let text = "민법 제750조 및 주택임대차보호법 제3조 제1항 제2호에 따라";
        let found: Vec<_> = find_statute_references(text)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(found, ["민법 제750조", "주택임대차보호법 제3조 제1항 제2호"]);
    }

    #[test]
    fn test_case_citations() {
        let text = "대법원 2019다12345 판결과 서울고등법원 2020나 5678 판결";
        let found: Vec<_> = find_case_citations(text).into_iter().map(|c| c.text).collect();
        assert_eq!(found, ["대법원 2019다12345", "서울고등법원 2020나 5678"]);
        assert!(find_case_citations("지방법원 2019가단1234").is_empty());
    }

    #[test]
    fn test_highlight_segments_cover_text() {
        let text = "근거: 민법 제750조 참조";
        let citations = find_citations(text);
        let segments = highlight_segments(text, &citations);
        assert_eq!(
            segments,
            [
                TextSegment { text: "근거: ", citation: None },
                TextSegment {
                    text: "민법 제750조",
                    citation: Some(CitationKind::Statute)
                },
                TextSegment { text: " 참조", citation: None },
            ]
        );
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_highlight_without_citations() {
        let segments = highlight_segments("판례 없음", &[]);
        assert_eq!(segments, [TextSegment { text: "판례 없음", citation: None }]);
        assert!(highlight_segments("", &[]).is_empty());
    }
}
