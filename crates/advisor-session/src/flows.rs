use std::collections::BTreeSet;

use advisor_prompt_template::{require_answers, validate_issue};
use advisor_utils::error::{AdviceError, SessionError};
use advisor_utils::types::AnswerSet;
use serde_json::Value;
use tracing::debug;

use crate::store::SessionStore;

/// Key of the obfuscated answer object.
pub const ANSWERS_KEY: &str = "analysisAnswers";

/// Key of the obfuscated issue string.
pub const ISSUE_KEY: &str = "legalIssue";

/// Store a new issue description.
///
/// Answers already in the session survive; only `mainIssue` is replaced.
/// An unreadable existing answer object is discarded.
///
/// # Errors
///
/// Returns `AdviceError::Issue` if the issue fails validation. Nothing is
/// written in that case.
pub fn record_issue(store: &mut dyn SessionStore, issue: &str) -> Result<AnswerSet, AdviceError> {
    validate_issue(issue)?;

    let mut update = AnswerSet::new();
    update.set_main_issue(issue);

    let mut answers: AnswerSet = store
        .get(ANSWERS_KEY)
        .and_then(|token| match read_answers(&token) {
            Ok(existing) => Some(existing),
            Err(err) => {
                debug!(error = %err, "Discarding unreadable stored answers");
                None
            }
        })
        .unwrap_or_default();
    answers.merge(update);

    write_issue(store, issue);
    write_answers(store, &answers);
    Ok(answers)
}

/// Store the clarifying answers together with the issue.
///
/// `selected` names the questions the user chose to answer; required ones
/// among them must be answered.
///
/// # Errors
///
/// Returns `AdviceError::Issue` for an invalid issue or an unanswered
/// required question. Nothing is written in that case.
pub fn record_answers(
    store: &mut dyn SessionStore,
    issue: &str,
    answers: &AnswerSet,
    selected: &BTreeSet<&str>,
) -> Result<AnswerSet, AdviceError> {
    validate_issue(issue)?;
    require_answers(answers, selected)?;

    let mut stored = answers.clone();
    stored.set_main_issue(issue);

    write_issue(store, issue);
    write_answers(store, &stored);
    Ok(stored)
}

/// Load the session for the answer form.
///
/// Reads the answer object first. If it carries no issue, the standalone
/// issue key fills `mainIssue`.
///
/// # Errors
///
/// Returns `SessionError::NoData` when neither key yields an issue.
pub fn load_answers(store: &dyn SessionStore) -> Result<AnswerSet, SessionError> {
    let mut answers = match store.get(ANSWERS_KEY) {
        Some(token) => read_answers(&token).unwrap_or_else(|err| {
            debug!(error = %err, "Stored answers unreadable, falling back to issue key");
            AnswerSet::new()
        }),
        None => AnswerSet::new(),
    };

    if answers.main_issue().is_some() {
        return Ok(answers);
    }

    let issue = store
        .get(ISSUE_KEY)
        .and_then(|token| match advisor_codec::read_token(&token) {
            Ok(Value::String(issue)) if !issue.is_empty() => Some(issue),
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "Stored issue unreadable");
                None
            }
        })
        .ok_or_else(|| SessionError::NoData {
            key: ISSUE_KEY.to_string(),
        })?;

    answers.set_main_issue(issue);
    Ok(answers)
}

/// Load the session before analysis.
///
/// Only the answer object is consulted, and it must carry the issue.
///
/// # Errors
///
/// - `SessionError::NoData` if no answer object is stored
/// - `SessionError::Decode` if it cannot be decoded
/// - `SessionError::NotAnObject` if it decodes to something else
/// - `SessionError::MissingIssue` if `mainIssue` is absent or empty
pub fn load_for_result(store: &dyn SessionStore) -> Result<AnswerSet, SessionError> {
    let token = store.get(ANSWERS_KEY).ok_or_else(|| SessionError::NoData {
        key: ANSWERS_KEY.to_string(),
    })?;
    let answers = read_answers(&token)?;
    if answers.main_issue().is_none() {
        return Err(SessionError::MissingIssue);
    }
    Ok(answers)
}

fn read_answers(token: &str) -> Result<AnswerSet, SessionError> {
    let value = advisor_codec::read_token(token)?;
    AnswerSet::from_json(&value).ok_or_else(|| SessionError::NotAnObject {
        key: ANSWERS_KEY.to_string(),
    })
}

fn write_issue(store: &mut dyn SessionStore, issue: &str) {
    store.set(ISSUE_KEY, advisor_codec::encode_text(issue));
}

fn write_answers(store: &mut dyn SessionStore, answers: &AnswerSet) {
    store.set(ANSWERS_KEY, advisor_codec::encode(&answers.to_json()));
    debug!(answers = answers.len(), "Stored session answers");
}
