//! Advice synthesis for replies that ignored the JSON instruction

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use advisor_utils::types::{StructuredAdvice, TitledItem};

use crate::payload::{AdvicePayload, DEFAULT_CATEGORY};

/// Substrings that mark a reply as an apology or error message.
pub const ERROR_MARKERS: [&str; 2] = ["죄송합니다", "오류"];

/// Replies shorter than this many characters are treated as errors.
pub const SHORT_TEXT_CHARS: usize = 100;

/// Category keywords, checked in order.
const CATEGORY_RULES: [(&[&str], &str); 4] = [
    (&["계약", "분쟁"], "계약 관련 분쟁"),
    (&["부동산", "임대", "전세"], "부동산/임대차"),
    (&["노동", "근로", "임금"], "노동/근로 관계"),
    (&["상속", "유언"], "상속/유언"),
];

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n|\r\n\r\n").unwrap());

/// Classify text by the first category whose keywords it contains.
#[must_use]
pub fn infer_category(text: &str) -> &'static str {
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map_or(DEFAULT_CATEGORY, |&(_, category)| category)
}

/// An apology, an error mention, or too short to be advice.
#[must_use]
pub fn is_error_shape(text: &str) -> bool {
    ERROR_MARKERS.iter().any(|marker| text.contains(marker))
        || text.chars().count() < SHORT_TEXT_CHARS
}

/// Fixed "could not analyze" advice; only the issue is interpolated.
#[must_use]
pub fn error_shape_advice(issue: &str) -> StructuredAdvice {
    AdvicePayload {
        category: Some(DEFAULT_CATEGORY.to_string()),
        summary: Some(format!(
            "입력하신 법률 문제({issue})에 대한 분석을 제공할 수 없습니다."
        )),
        legal_analysis: Some(vec![TitledItem::new(
            "처리 오류",
            "현재 시스템이 법률 분석을 생성하는 데 어려움이 있습니다. 다시 시도해주세요.",
        )]),
        recommendations: Some(vec![TitledItem::new(
            "권장 사항",
            "질문을 더 구체적으로 작성하거나, 법률 문제의 핵심 사항만 간략하게 설명해 보세요.",
        )]),
        next_steps: Some(
            "문제가 지속되면 직접 법률 전문가에게 상담하시는 것을 권장합니다.".to_string(),
        ),
    }
    .finalize()
}

/// Build advice from free text.
///
/// Error-shaped text yields [`error_shape_advice`]. Otherwise blank-line
/// separated paragraphs fill, in order, the summary, the single analysis
/// item, the single recommendation item, and the next steps; absent
/// paragraphs get fixed fallbacks.
#[must_use]
pub fn synthesize_from_text(text: &str, issue: &str) -> StructuredAdvice {
    if is_error_shape(text) {
        debug!(chars = text.chars().count(), "Reply is error-shaped");
        return error_shape_advice(issue);
    }

    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect();
    let paragraph = |index: usize, fallback: &str| {
        paragraphs
            .get(index)
            .map_or_else(|| fallback.to_string(), |p| (*p).to_string())
    };

    debug!(paragraphs = paragraphs.len(), "Synthesizing advice from text");

    AdvicePayload {
        category: Some(infer_category(text).to_string()),
        summary: Some(paragraph(
            0,
            &format!("귀하의 법률 문제({issue})에 대한 분석입니다."),
        )),
        legal_analysis: Some(vec![TitledItem::new(
            "법률 분석",
            paragraph(1, "상세한 법률 분석을 제공할 수 없습니다."),
        )]),
        recommendations: Some(vec![TitledItem::new(
            "권장 대응 방안",
            paragraph(
                2,
                "현재 시스템은 귀하의 상황에 대한 구체적인 대응 방안을 제시할 수 없습니다.",
            ),
        )]),
        next_steps: Some(paragraph(
            3,
            "추가적인 법률 자문을 위해 변호사와 상담하는 것을 권장합니다.",
        )),
    }
    .finalize()
}
