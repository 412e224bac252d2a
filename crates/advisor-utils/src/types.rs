//! Core domain types shared across the advisor crates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Answer key holding the primary issue description.
pub const MAIN_ISSUE_KEY: &str = "mainIssue";

/// A `{ title, content }` pair used for analysis and recommendation entries.
///
/// `content` may itself hold an implicit list that the segmentation engine
/// expands at render time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TitledItem {
    pub title: String,
    pub content: String,
}

impl TitledItem {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Normalized legal-advice result.
///
/// Every field is present and non-empty once it leaves the normalizer; the
/// item sequences always hold at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAdvice {
    pub category: String,
    pub summary: String,
    pub legal_analysis: Vec<TitledItem>,
    pub recommendations: Vec<TitledItem>,
    pub next_steps: String,
}

/// A titled block of paragraphs produced by section segmentation.
///
/// `title` is empty for a leading untitled section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdviceSection {
    pub title: String,
    pub content: Vec<String>,
}

impl AdviceSection {
    #[must_use]
    pub fn untitled(content: Vec<String>) -> Self {
        Self {
            title: String::new(),
            content,
        }
    }
}

/// Mapping from question identifier to freeform answer text.
///
/// Includes the distinguished [`MAIN_ISSUE_KEY`] once the issue is known.
/// Ordering is irrelevant; a `BTreeMap` keeps serialization deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for `key`, treating empty text as unanswered.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn main_issue(&self) -> Option<&str> {
        self.get(MAIN_ISSUE_KEY)
    }

    pub fn set_main_issue(&mut self, issue: impl Into<String>) {
        self.insert(MAIN_ISSUE_KEY, issue);
    }

    /// Merge `other` into `self`, `other` winning on key conflicts.
    pub fn merge(&mut self, other: AnswerSet) {
        self.0.extend(other.0);
    }

    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build an answer set from a decoded JSON value.
    ///
    /// Returns `None` unless the value is an object. Scalar members are
    /// stringified; nulls, arrays, and nested objects are skipped.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut answers = Self::new();
        for (key, member) in object {
            let text = match member {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            answers.insert(key.clone(), text);
        }
        Some(answers)
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}

impl FromIterator<(String, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_advice_uses_camel_case_keys() {
        let advice = StructuredAdvice {
            category: "법률 자문".to_string(),
            summary: "요약".to_string(),
            legal_analysis: vec![TitledItem::new("a", "b")],
            recommendations: vec![TitledItem::new("c", "d")],
            next_steps: "다음".to_string(),
        };
        let value = serde_json::to_value(&advice).unwrap();
        assert!(value.get("legalAnalysis").is_some());
        assert!(value.get("nextSteps").is_some());
        assert!(value.get("legal_analysis").is_none());
    }

    #[test]
    fn test_answer_set_treats_empty_as_unanswered() {
        let answers = AnswerSet::new().with("amount", "").with("attempts", "내용증명");
        assert_eq!(answers.get("amount"), None);
        assert_eq!(answers.get("attempts"), Some("내용증명"));
    }

    #[test]
    fn test_answer_set_from_json_skips_non_scalars() {
        let value = json!({
            "mainIssue": "보증금 반환",
            "amount": 5000000,
            "nested": {"a": 1},
            "empty": null
        });
        let answers = AnswerSet::from_json(&value).unwrap();
        assert_eq!(answers.main_issue(), Some("보증금 반환"));
        assert_eq!(answers.get("amount"), Some("5000000"));
        assert_eq!(answers.len(), 2);
        assert!(AnswerSet::from_json(&json!("text")).is_none());
    }

    #[test]
    fn test_merge_prefers_incoming_values() {
        let mut base = AnswerSet::new().with("mainIssue", "old").with("amount", "1");
        base.merge(AnswerSet::new().with("mainIssue", "new"));
        assert_eq!(base.main_issue(), Some("new"));
        assert_eq!(base.get("amount"), Some("1"));
    }
}
