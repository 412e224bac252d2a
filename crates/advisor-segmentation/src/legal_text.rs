//! Paragraph splitting for legal-analysis content

use crate::markers::{decimal_head, marker_follows, skip_whitespace};

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Split legal-analysis content into display paragraphs.
///
/// Multi-line text yields its non-empty lines, trimmed. Single-line text
/// is additionally tried as an inline numbered list (`1. ... 2. ...`);
/// more than one item replaces the line. Blank input yields one empty
/// paragraph.
#[must_use]
pub fn format_legal_text(text: &str) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let lines: Vec<String> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if lines.len() <= 1 {
        let chars: Vec<char> = text.chars().collect();
        let items = numbered_items(&chars);
        if items.len() > 1 {
            return items;
        }
    }
    lines
}

/// Items shaped `N. <non-digit>...`, each running to the next decimal
/// marker or the end of the text, never across a line break.
fn numbered_items(chars: &[char]) -> Vec<String> {
    let mut items = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        match numbered_item_end(chars, pos) {
            Some(end) => {
                items.push(chars[pos..end].iter().collect());
                pos = end;
            }
            None => pos += 1,
        }
    }
    items
}

fn numbered_item_end(chars: &[char], pos: usize) -> Option<usize> {
    let head_end = decimal_head(chars, pos)?;
    let ws_end = skip_whitespace(chars, head_end);
    if ws_end == head_end {
        return None;
    }

    // `first` is the required non-digit after the whitespace; the body
    // after it is as short as possible.
    for first in (head_end + 1..=ws_end).rev() {
        match chars.get(first) {
            Some(c) if !c.is_ascii_digit() => {}
            _ => continue,
        }
        let mut end = first + 1;
        loop {
            if marker_follows(chars, end, decimal_head) {
                return Some(end);
            }
            if end >= chars.len() || is_line_terminator(chars[end]) {
                break;
            }
            end += 1;
        }
    }
    None
}
