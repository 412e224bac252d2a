use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```").unwrap());

static BRACE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Where a JSON candidate was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    /// Inner text of a fenced code block
    Fenced,
    /// First `{` through last `}`
    Braces,
    /// The whole reply
    Raw,
}

impl ExtractionPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fenced => "fenced",
            Self::Braces => "braces",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for ExtractionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed candidate text and its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub path: ExtractionPath,
    pub text: &'a str,
}

impl Candidate<'_> {
    /// Starts with `{` and ends with `}`.
    #[must_use]
    pub fn is_json_shaped(&self) -> bool {
        self.text.starts_with('{') && self.text.ends_with('}')
    }
}

/// Pick the JSON candidate from raw provider text; first match wins.
#[must_use]
pub fn extract_candidate(raw: &str) -> Candidate<'_> {
    if let Some(inner) = FENCED_BLOCK.captures(raw).and_then(|caps| caps.get(1))
        && !inner.as_str().is_empty()
    {
        return Candidate {
            path: ExtractionPath::Fenced,
            text: inner.as_str().trim(),
        };
    }
    if let Some(span) = BRACE_SPAN.find(raw) {
        return Candidate {
            path: ExtractionPath::Braces,
            text: span.as_str().trim(),
        };
    }
    Candidate {
        path: ExtractionPath::Raw,
        text: raw.trim(),
    }
}
