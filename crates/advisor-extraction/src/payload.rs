//! Typed boundary for provider JSON
//!
//! Field values are accepted leniently (scalars are stringified, item lists
//! may be a single object) and anything unusable counts as missing.
//! [`AdvicePayload::finalize`] is the only place a [`StructuredAdvice`] is
//! built, for parsed and synthesized advice alike.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use advisor_utils::types::{StructuredAdvice, TitledItem};

pub const DEFAULT_CATEGORY: &str = "법률 자문";
pub const DEFAULT_SUMMARY: &str = "요약 정보가 제공되지 않았습니다.";
pub const DEFAULT_ANALYSIS: (&str, &str) = ("법률 분석", "법률 분석 정보가 제공되지 않았습니다.");
pub const DEFAULT_RECOMMENDATION: (&str, &str) = ("대응 방안", "대응 방안 정보가 제공되지 않았습니다.");
pub const DEFAULT_NEXT_STEPS: &str = "다음 단계 정보가 제공되지 않았습니다.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AdvicePayload {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub legal_analysis: Option<Vec<TitledItem>>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub recommendations: Option<Vec<TitledItem>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub next_steps: Option<String>,
}

pub(crate) fn parse(candidate: &str) -> Result<AdvicePayload, serde_json::Error> {
    serde_json::from_str(candidate)
}

impl AdvicePayload {
    /// Fill every missing or empty field with its default.
    pub(crate) fn finalize(self) -> StructuredAdvice {
        StructuredAdvice {
            category: text_or(self.category, DEFAULT_CATEGORY),
            summary: text_or(self.summary, DEFAULT_SUMMARY),
            legal_analysis: items_or(self.legal_analysis, DEFAULT_ANALYSIS),
            recommendations: items_or(self.recommendations, DEFAULT_RECOMMENDATION),
            next_steps: text_or(self.next_steps, DEFAULT_NEXT_STEPS),
        }
    }
}

fn text_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn items_or(value: Option<Vec<TitledItem>>, (title, content): (&str, &str)) -> Vec<TitledItem> {
    value
        .filter(|items| !items.is_empty())
        .unwrap_or_else(|| vec![TitledItem::new(title, content)])
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

fn item_from(value: &Value) -> Option<TitledItem> {
    match value {
        Value::Object(fields) => {
            let field = |name: &str| fields.get(name).and_then(scalar_text).unwrap_or_default();
            let item = TitledItem::new(field("title"), field("content"));
            (!item.title.is_empty() || !item.content.is_empty()).then_some(item)
        }
        Value::String(content) if !content.is_empty() => {
            Some(TitledItem::new(String::new(), content.clone()))
        }
        _ => None,
    }
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<TitledItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let items = match &value {
        Value::Array(entries) => entries.iter().filter_map(item_from).collect(),
        Value::Object(_) => item_from(&value).into_iter().collect(),
        _ => return Ok(None),
    };
    Ok(Some(items))
}
