//! Numbered-list segmentation cascade

use crate::events::{ListStage, SegmentationEvent, SegmentationObserver, TracingObserver};
use crate::markers::{
    DECIMAL_MARKER, FIRST_MARKER, INNER_MARKER, LINE_MARKER, alpha_head, decimal_head,
    is_hangul_syllable, scan_items,
};

/// Texts longer than this many characters may be chunked by words.
pub const CHUNK_THRESHOLD_CHARS: usize = 100;

/// Words per chunk in the word-chunk stage.
pub const CHUNK_WORDS: usize = 15;

/// Split a paragraph into list items, reporting the stage via `tracing`.
///
/// See [`split_numbered_list_with`].
#[must_use]
pub fn split_numbered_list(text: &str) -> Vec<String> {
    split_numbered_list_with(text, &TracingObserver)
}

/// Split a paragraph into list items.
///
/// Stages run in order and the first that yields at least two items wins:
///
/// 1. every non-empty line starts with its own marker;
/// 2. a leading marker, then a split at each later whitespace-delimited
///    marker;
/// 3. decimal items whose bodies contain no digits or `.`/`)`, then the
///    same with Hangul/Latin letter markers;
/// 4. a split in front of every decimal marker;
/// 5. sentence boundaries (`.` and whitespace, not followed by a digit);
/// 6. for texts over [`CHUNK_THRESHOLD_CHARS`] characters, chunks of
///    [`CHUNK_WORDS`] words.
///
/// Otherwise the trimmed text is the only item. Items are trimmed and keep
/// their markers; use [`crate::strip_leading_marker`] for display. Blank
/// input yields a single empty item.
pub fn split_numbered_list_with(text: &str, observer: &dyn SegmentationObserver) -> Vec<String> {
    let (stage, items) = run_cascade(text);
    observer.on_event(&SegmentationEvent::ListStage {
        stage,
        items: items.len(),
    });
    items
}

fn run_cascade(text: &str) -> (ListStage, Vec<String>) {
    if text.trim().is_empty() {
        return (ListStage::Whole, vec![String::new()]);
    }

    if let Some(items) = line_markers(text) {
        return (ListStage::LineMarkers, items);
    }
    if let Some(items) = inline_markers(text) {
        return (ListStage::InlineMarkers, items);
    }

    let chars: Vec<char> = text.chars().collect();
    let decimal = trimmed(scan_items(&chars, decimal_head, |c| {
        c.is_ascii_digit() || c == '.' || c == ')'
    }));
    if decimal.len() > 1 {
        return (ListStage::DecimalItems, decimal);
    }
    let alpha = trimmed(scan_items(&chars, alpha_head, |c| {
        c.is_ascii_alphabetic() || is_hangul_syllable(c) || c == '.' || c == ')'
    }));
    if alpha.len() > 1 {
        return (ListStage::AlphaItems, alpha);
    }

    if let Some(items) = forced_split(text) {
        return (ListStage::ForcedSplit, items);
    }
    if let Some(items) = sentences(&chars) {
        return (ListStage::Sentences, items);
    }
    if let Some(items) = word_chunks(text, chars.len()) {
        return (ListStage::WordChunks, items);
    }

    (ListStage::Whole, vec![text.trim().to_string()])
}

fn trimmed(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|item| item.trim().to_string()).collect()
}

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn line_markers(text: &str) -> Option<Vec<String>> {
    let lines = non_empty_lines(text);
    if lines.len() > 1 && lines.iter().all(|line| LINE_MARKER.is_match(line)) {
        Some(lines.into_iter().map(str::to_string).collect())
    } else {
        None
    }
}

fn inline_markers(text: &str) -> Option<Vec<String>> {
    let first = FIRST_MARKER.find(text)?;
    let rest_start = first.end();
    let starts: Vec<usize> = INNER_MARKER
        .find_iter(&text[rest_start..])
        .map(|m| rest_start + m.start())
        .collect();
    if starts.is_empty() {
        return None;
    }

    let mut items = Vec::with_capacity(starts.len() + 1);
    let mut from = 0;
    for start in starts {
        items.push(text[from..start].trim().to_string());
        from = start;
    }
    items.push(text[from..].trim().to_string());
    Some(items)
}

fn forced_split(text: &str) -> Option<Vec<String>> {
    let starts: Vec<usize> = DECIMAL_MARKER.find_iter(text).map(|m| m.start()).collect();
    if starts.len() < 2 {
        return None;
    }

    let mut pieces = Vec::new();
    let mut from = 0;
    for start in starts.into_iter().filter(|&start| start > 0) {
        pieces.push(&text[from..start]);
        from = start;
    }
    pieces.push(&text[from..]);

    let items: Vec<String> = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();
    (items.len() > 1).then_some(items)
}

fn sentences(chars: &[char]) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut from = 0;
    for pos in 2..chars.len() {
        if chars[pos - 2] == '.' && chars[pos - 1].is_whitespace() && !chars[pos].is_ascii_digit() {
            items.push(chars[from..pos].iter().collect::<String>());
            from = pos;
        }
    }
    items.push(chars[from..].iter().collect());

    let items: Vec<String> = items
        .into_iter()
        .map(|sentence| sentence.trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect();
    (items.len() > 1).then_some(items)
}

fn word_chunks(text: &str, char_count: usize) -> Option<Vec<String>> {
    if char_count <= CHUNK_THRESHOLD_CHARS {
        return None;
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunks: Vec<String> = words.chunks(CHUNK_WORDS).map(|chunk| chunk.join(" ")).collect();
    (chunks.len() > 1).then_some(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullObserver;
    use crate::markers::strip_leading_marker;
    use proptest::prelude::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<SegmentationEvent>>);

    impl SegmentationObserver for Recorder {
        fn on_event(&self, event: &SegmentationEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    fn stage_of(text: &str) -> ListStage {
        let recorder = Recorder::default();
        split_numbered_list_with(text, &recorder);
        let events = recorder.0.into_inner().unwrap();
        match events.as_slice() {
            [SegmentationEvent::ListStage { stage, .. }] => *stage,
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn test_inline_numbered_items() {
        let items = split_numbered_list("1. 사과 2. 바나나 3. 체리");
        assert_eq!(items.len(), 3);
        let bare: Vec<_> = items.iter().map(|item| strip_leading_marker(item)).collect();
        assert_eq!(bare, ["사과", "바나나", "체리"]);
        assert_eq!(stage_of("1. 사과 2. 바나나 3. 체리"), ListStage::InlineMarkers);
    }

    #[test]
    fn test_line_markers() {
        let text = "1. 내용증명 발송\n  2) 지급명령 신청\n\n가. 소송 제기\n";
        let items = split_numbered_list_with(text, &NullObserver);
        assert_eq!(items, ["1. 내용증명 발송", "2) 지급명령 신청", "가. 소송 제기"]);
        assert_eq!(stage_of(text), ListStage::LineMarkers);
    }

    #[test]
    fn test_line_markers_require_every_line() {
        let text = "1. 내용증명 발송\n추가 설명";
        assert_ne!(stage_of(text), ListStage::LineMarkers);
    }

    #[test]
    fn test_inline_first_item_keeps_head() {
        let items = split_numbered_list("가. 협상 시도 나. 조정 신청 다. 소송");
        assert_eq!(items, ["가. 협상 시도", "나. 조정 신청", "다. 소송"]);
    }

    #[test]
    fn test_decimal_items_without_leading_marker() {
        let text = "다음 절차를 따르세요: 1) 증거 수집 2) 내용증명 발송";
        let items = split_numbered_list(text);
        assert_eq!(items, ["1) 증거 수집", "2) 내용증명 발송"]);
        assert_eq!(stage_of(text), ListStage::DecimalItems);
    }

    #[test]
    fn test_single_decimal_item_falls_through() {
        // one scanned item is not enough; sentences take over
        let text = "먼저 확인하세요. 그 다음 1) 증거 수집";
        let items = split_numbered_list(text);
        assert_eq!(items, ["먼저 확인하세요.", "그 다음 1) 증거 수집"]);
        assert_eq!(stage_of(text), ListStage::Sentences);
    }

    #[test]
    fn test_forced_split_before_decimal_markers() {
        let text = "절차:1.증거 수집 2.내용증명";
        let items = split_numbered_list(text);
        assert_eq!(items, ["절차:", "1.증거 수집", "2.내용증명"]);
        assert_eq!(stage_of(text), ListStage::ForcedSplit);
    }

    #[test]
    fn test_forced_split_keeps_multi_digit_numbers() {
        let items = split_numbered_list("항목10.첫째 11.둘째");
        assert_eq!(items, ["항목", "10.첫째", "11.둘째"]);
    }

    #[test]
    fn test_sentence_split_ignores_decimals() {
        let text = "계약서를 확인하세요. 이자는 연 5. 3%입니다. 증거를 보관하세요.";
        let items = split_numbered_list(text);
        assert_eq!(
            items,
            ["계약서를 확인하세요.", "이자는 연 5. 3%입니다.", "증거를 보관하세요."]
        );
    }

    #[test]
    fn test_word_chunks_for_long_unpunctuated_text() {
        let text = (1..=40).map(|i| format!("단어{i}")).collect::<Vec<_>>().join(" ");
        assert!(text.chars().count() > CHUNK_THRESHOLD_CHARS);
        let items = split_numbered_list(&text);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].split(' ').count(), 15);
        assert_eq!(items[2].split(' ').count(), 10);
        assert_eq!(stage_of(&text), ListStage::WordChunks);
    }

    #[test]
    fn test_short_plain_text_is_single_item() {
        let text = "  임대인에게 보증금 반환을 요구하세요  ";
        assert_eq!(split_numbered_list(text), ["임대인에게 보증금 반환을 요구하세요"]);
        assert_eq!(stage_of(text), ListStage::Whole);
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(split_numbered_list(""), [""]);
        assert_eq!(split_numbered_list(" \n\t"), [""]);
    }

    proptest! {
        #[test]
        fn prop_cascade_always_returns_items(text in "[가-힣a-c0-9.) \n]{0,240}") {
            let items = split_numbered_list_with(&text, &NullObserver);
            prop_assert!(!items.is_empty());
            if !text.trim().is_empty() {
                for item in &items {
                    prop_assert!(!item.is_empty());
                    prop_assert_eq!(item.as_str(), item.trim());
                }
            }
        }
    }
}
