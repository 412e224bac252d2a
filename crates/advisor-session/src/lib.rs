//! Per-session persistence of the legal issue and clarifying answers
//!
//! Values are written through the obfuscation codec into a string
//! key-value store. The issue is kept under two keys: as `mainIssue` inside
//! the answer object, and on its own under [`ISSUE_KEY`] for sessions
//! started by older versions.

mod flows;
mod store;

pub use flows::{
    ANSWERS_KEY, ISSUE_KEY, load_answers, load_for_result, record_answers, record_issue,
};
pub use store::{MemoryStore, SessionStore};
