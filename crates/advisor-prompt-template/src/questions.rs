use std::collections::BTreeSet;

use advisor_utils::error::IssueError;
use advisor_utils::types::AnswerSet;

/// Minimum issue length, in characters after trimming.
pub const MIN_ISSUE_CHARS: usize = 5;

/// Input control a question is answered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Date,
    Text,
    TextArea,
}

/// A clarifying question asked before analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Answer key in the [`AnswerSet`].
    pub id: &'static str,
    pub text: &'static str,
    pub required: bool,
    pub kind: QuestionKind,
}

/// The fixed question catalog, in display order.
pub const QUESTIONS: [Question; 5] = [
    Question {
        id: "incidentDate",
        text: "사건이 발생한 날짜는 언제인가요?",
        required: true,
        kind: QuestionKind::Date,
    },
    Question {
        id: "amount",
        text: "관련된 금액이 있다면 얼마인가요? (예: 계약금, 손해액 등)",
        required: false,
        kind: QuestionKind::Text,
    },
    Question {
        id: "attempts",
        text: "현재까지 어떤 해결 시도를 하셨나요?",
        required: false,
        kind: QuestionKind::TextArea,
    },
    Question {
        id: "desiredOutcome",
        text: "원하시는 해결 방향이나 결과는 무엇인가요?",
        required: false,
        kind: QuestionKind::TextArea,
    },
    Question {
        id: "additionalInfo",
        text: "추가로 알려주실 정보가 있으신가요?",
        required: false,
        kind: QuestionKind::TextArea,
    },
];

/// Check an issue description before it is stored or analyzed.
///
/// # Errors
///
/// Returns `IssueError::Empty` for blank text and `IssueError::TooShort`
/// below [`MIN_ISSUE_CHARS`].
pub fn validate_issue(issue: &str) -> Result<(), IssueError> {
    let trimmed = issue.trim();
    if trimmed.is_empty() {
        return Err(IssueError::Empty);
    }
    let actual = trimmed.chars().count();
    if actual < MIN_ISSUE_CHARS {
        return Err(IssueError::TooShort {
            min: MIN_ISSUE_CHARS,
            actual,
        });
    }
    Ok(())
}

/// Questions selected initially: required ones plus any already answered.
#[must_use]
pub fn default_selection(answers: &AnswerSet) -> BTreeSet<&'static str> {
    QUESTIONS
        .iter()
        .filter(|q| q.required || answers.get(q.id).is_some())
        .map(|q| q.id)
        .collect()
}

/// Ids of required questions that are selected but unanswered.
#[must_use]
pub fn missing_required(answers: &AnswerSet, selected: &BTreeSet<&str>) -> Vec<String> {
    QUESTIONS
        .iter()
        .filter(|q| q.required && selected.contains(q.id) && answers.get(q.id).is_none())
        .map(|q| q.id.to_string())
        .collect()
}

/// [`missing_required`] as a validation step.
///
/// # Errors
///
/// Returns `IssueError::MissingRequiredAnswer` listing the unanswered ids.
pub fn require_answers(answers: &AnswerSet, selected: &BTreeSet<&str>) -> Result<(), IssueError> {
    let ids = missing_required(answers, selected);
    if ids.is_empty() {
        Ok(())
    } else {
        Err(IssueError::MissingRequiredAnswer { ids })
    }
}
