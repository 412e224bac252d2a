//! List-marker patterns and the item scanner shared by the cascades
//!
//! A marker is a decimal number, a single Hangul syllable, or a single
//! Latin letter, followed by `.` or `)`. Digits are ASCII only.

use regex::Regex;
use std::sync::LazyLock;

/// Line that starts with a marker followed by whitespace.
pub(crate) static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[0-9]+[.)]|[가-힣][.)]|[a-zA-Z][.)])\s").unwrap());

/// Marker at the very start of the text, with its trailing whitespace.
pub(crate) static FIRST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[0-9]+[.)]|[가-힣][.)]|[a-zA-Z][.)])\s+").unwrap());

/// Whitespace-delimited marker inside a run of text.
pub(crate) static INNER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(?:[0-9]+[.)]|[가-힣][.)]|[a-zA-Z][.)])\s+").unwrap());

pub(crate) static DECIMAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[.)]").unwrap());

static LEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[0-9]+[.)]|[가-힣][.)]|[a-zA-Z][.)])\s*").unwrap());

/// Remove the first list marker of `text`, if it starts with one.
///
/// Handles decimal, Hangul, and Latin markers. Text without a leading
/// marker is returned unchanged.
#[must_use]
pub fn strip_leading_marker(text: &str) -> &str {
    match LEADING_MARKER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Matches a marker head at `pos` and returns the index after it.
pub(crate) type HeadMatcher = fn(&[char], usize) -> Option<usize>;

fn is_marker_punct(c: char) -> bool {
    c == '.' || c == ')'
}

pub(crate) fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

/// `[0-9]+[.)]` at `pos`.
pub(crate) fn decimal_head(chars: &[char], pos: usize) -> Option<usize> {
    let mut end = pos;
    while end < chars.len() && chars[end].is_ascii_digit() {
        end += 1;
    }
    if end == pos || end >= chars.len() || !is_marker_punct(chars[end]) {
        return None;
    }
    Some(end + 1)
}

/// `[a-zA-Z가-힣][.)]` at `pos`.
pub(crate) fn alpha_head(chars: &[char], pos: usize) -> Option<usize> {
    let letter = *chars.get(pos)?;
    if !(letter.is_ascii_alphabetic() || is_hangul_syllable(letter)) {
        return None;
    }
    match chars.get(pos + 1) {
        Some(&c) if is_marker_punct(c) => Some(pos + 2),
        _ => None,
    }
}

/// End of whitespace run starting at `pos`.
pub(crate) fn skip_whitespace(chars: &[char], pos: usize) -> usize {
    let mut end = pos;
    while end < chars.len() && chars[end].is_whitespace() {
        end += 1;
    }
    end
}

/// True at end of input, or where whitespace is followed by a marker head.
pub(crate) fn marker_follows(chars: &[char], pos: usize, head: HeadMatcher) -> bool {
    if pos >= chars.len() {
        return true;
    }
    let ws_end = skip_whitespace(chars, pos);
    ws_end > pos && head(chars, ws_end).is_some()
}

/// Find every non-overlapping item of the shape
/// `head, whitespace, body` where the body avoids `excluded` characters and
/// is followed by another head or the end of input.
///
/// Items are found left to right. The whitespace run and the body are
/// greedy, backing off one character at a time until the item is followed
/// by a marker.
pub(crate) fn scan_items(chars: &[char], head: HeadMatcher, excluded: fn(char) -> bool) -> Vec<String> {
    let mut items = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        match item_end_at(chars, pos, head, excluded) {
            Some(end) => {
                items.push(chars[pos..end].iter().collect());
                pos = end;
            }
            None => pos += 1,
        }
    }
    items
}

fn item_end_at(
    chars: &[char],
    pos: usize,
    head: HeadMatcher,
    excluded: fn(char) -> bool,
) -> Option<usize> {
    let head_end = head(chars, pos)?;
    let ws_end = skip_whitespace(chars, head_end);
    if ws_end == head_end {
        return None;
    }

    for body_start in (head_end + 1..=ws_end).rev() {
        let mut run_end = body_start;
        while run_end < chars.len() && !excluded(chars[run_end]) {
            run_end += 1;
        }
        for end in (body_start + 1..=run_end).rev() {
            if marker_follows(chars, end, head) {
                return Some(end);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn test_strip_leading_marker_handles_all_alphabets() {
        assert_eq!(strip_leading_marker("1. 사과"), "사과");
        assert_eq!(strip_leading_marker("  12) 내용증명 발송"), "내용증명 발송");
        assert_eq!(strip_leading_marker("가. 협상"), "협상");
        assert_eq!(strip_leading_marker("B)소송"), "소송");
        assert_eq!(strip_leading_marker("계약서 검토"), "계약서 검토");
        assert_eq!(strip_leading_marker("2024년 1월"), "2024년 1월");
    }

    #[test]
    fn test_heads() {
        let text = chars("12) 가. x");
        assert_eq!(decimal_head(&text, 0), Some(3));
        assert_eq!(decimal_head(&text, 3), None);
        assert_eq!(alpha_head(&text, 4), Some(6));
        assert_eq!(alpha_head(&text, 7), None);
    }

    #[test]
    fn test_scan_items_stops_before_next_marker() {
        let text = chars("1. 사과 2. 바나나 3. 체리");
        let items = scan_items(&text, decimal_head, |c| c.is_ascii_digit() || c == '.' || c == ')');
        assert_eq!(items, ["1. 사과", "2. 바나나", "3. 체리"]);
    }

    #[test]
    fn test_scan_items_skips_unterminated_bodies() {
        // the body of "1." runs into "3" which is not preceded by a marker
        let text = chars("1. 금액 3억 원");
        let items = scan_items(&text, decimal_head, |c| c.is_ascii_digit() || c == '.' || c == ')');
        assert!(items.is_empty());
    }
}
