use std::fmt;
use thiserror::Error;

/// Top-level error returned by advisor operations.
///
/// Only configuration problems, provider failures, unrecoverable session
/// data, and rejected input are escalated. A provider reply that is not the
/// requested JSON is never an error: the normalizer synthesizes advice from
/// the text instead.
///
/// | Variant | Meaning | Caller reaction |
/// |---------|---------|-----------------|
/// | `Configuration` | API key absent/placeholder, invalid config | blocking message |
/// | `Provider` | non-success HTTP status, transport failure | manual retry |
/// | `Decode` | session data missing or unrecoverable | restart the flow |
/// | `Issue` | issue text or required answers rejected | fix the input |
/// | `Busy` | an expert-advice request is still outstanding | wait |
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    #[error("Session data error: {0}")]
    Decode(#[from] SessionError),

    #[error("Invalid input: {0}")]
    Issue(#[from] IssueError),

    #[error("An expert advice request is already in progress")]
    Busy,
}

/// Trait for errors that can render user-facing guidance
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get contextual information about the error
    fn context(&self) -> Option<String>;

    /// Get suggested actions to resolve the error
    fn suggestions(&self) -> Vec<String>;

    /// Get the error category for grouping similar errors
    fn category(&self) -> ErrorCategory;
}

/// Categories of errors for better organization and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Provider,
    Session,
    Input,
    Concurrency,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Provider => write!(f, "Provider"),
            Self::Session => write!(f, "Session"),
            Self::Input => write!(f, "Input"),
            Self::Concurrency => write!(f, "Concurrency"),
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },

    #[error("API key not found in environment variable '{env}'")]
    MissingApiKey { env: String },

    #[error("API key in environment variable '{env}' is a placeholder or too short")]
    PlaceholderApiKey { env: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile(reason) => format!("Configuration file has invalid format: {reason}"),
            Self::InvalidValue { key, value } => {
                format!("Configuration '{key}' has invalid value: {value}")
            }
            Self::NotFound { path } => format!("Configuration file not found: {path}"),
            Self::MissingApiKey { env } => {
                format!("The provider API key is not set (expected in '{env}')")
            }
            Self::PlaceholderApiKey { env } => {
                format!("The provider API key in '{env}' is not a valid key")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::MissingApiKey { .. } | Self::PlaceholderApiKey { .. } => Some(
                "Advice generation needs a real language-model API key before any request is sent."
                    .to_string(),
            ),
            Self::InvalidFile(_) | Self::NotFound { .. } => {
                Some("Configuration is read from .legal-advisor/config.toml.".to_string())
            }
            Self::InvalidValue { .. } => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingApiKey { env } => vec![
                format!("Export {env} with your provider API key"),
                "Or set [provider] api_key_env to the variable you use".to_string(),
            ],
            Self::PlaceholderApiKey { env } => vec![
                format!("Replace the placeholder value of {env} with a real key"),
            ],
            Self::InvalidFile(_) => vec!["Check the TOML syntax of the config file".to_string()],
            Self::InvalidValue { key, .. } => vec![format!("Correct the value of '{key}'")],
            Self::NotFound { .. } => vec!["Check the config path you passed".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}

/// LLM provider errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Transport-level failure (HTTP connectivity, client construction)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status
    #[error("Provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    /// The provider answered with a body that is not its JSON envelope
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether a manual retry by the user can reasonably succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidResponse(_) => true,
        }
    }
}

impl UserFriendlyError for LlmError {
    fn user_message(&self) -> String {
        match self {
            Self::Transport(msg) => format!("Could not reach the advice provider: {msg}"),
            Self::Provider { status, .. } => {
                format!("The advice provider rejected the request (HTTP {status})")
            }
            Self::InvalidResponse(msg) => {
                format!("The advice provider sent an unreadable response: {msg}")
            }
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Provider { status: 401 | 403, .. } => {
                Some("Authentication errors indicate an invalid or revoked API key.".to_string())
            }
            Self::Provider { status: 429, .. } => {
                Some("The provider's rate limit was exceeded.".to_string())
            }
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        if self.is_retryable() {
            vec!["Wait a moment and try again".to_string()]
        } else {
            vec!["Check the provider API key and endpoint configuration".to_string()]
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Provider
    }
}

/// The obfuscation codec could not recover a value by either decode path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Token could not be decoded (obfuscated path: {obfuscated}; legacy path: {legacy})")]
pub struct DecodeError {
    pub obfuscated: String,
    pub legacy: String,
}

/// Session store read errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session data stored under '{key}'")]
    NoData { key: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Session data under '{key}' is not an answer object")]
    NotAnObject { key: String },

    #[error("Session data does not contain the legal issue")]
    MissingIssue,
}

impl UserFriendlyError for SessionError {
    fn user_message(&self) -> String {
        match self {
            Self::NoData { .. } | Self::MissingIssue => {
                "No legal issue was found for this session".to_string()
            }
            Self::Decode(_) | Self::NotAnObject { .. } => {
                "The saved consultation data could not be read".to_string()
            }
        }
    }

    fn context(&self) -> Option<String> {
        Some("Session data lives only for the current browser session.".to_string())
    }

    fn suggestions(&self) -> Vec<String> {
        vec!["Start the consultation again".to_string()]
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Session
    }
}

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    #[error("The legal issue description is empty")]
    Empty,

    #[error("The legal issue description needs at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Required questions are unanswered: {}", ids.join(", "))]
    MissingRequiredAnswer { ids: Vec<String> },
}

impl UserFriendlyError for IssueError {
    fn user_message(&self) -> String {
        match self {
            Self::Empty => "법률 문제를 입력해주세요.".to_string(),
            Self::TooShort { min, .. } => {
                format!("법률 문제를 더 자세히 설명해주세요 (최소 {min}자 이상).")
            }
            Self::MissingRequiredAnswer { .. } => "필수 질문에 모두 답변해주세요.".to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        None
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredAnswer { ids } => ids
                .iter()
                .map(|id| format!("Answer the '{id}' question"))
                .collect(),
            _ => vec!["Describe the situation in a full sentence".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

impl UserFriendlyError for AdviceError {
    fn user_message(&self) -> String {
        match self {
            Self::Configuration(e) => e.user_message(),
            Self::Provider(e) => e.user_message(),
            Self::Decode(e) => e.user_message(),
            Self::Issue(e) => e.user_message(),
            Self::Busy => "Expert advice is already being generated".to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Configuration(e) => e.context(),
            Self::Provider(e) => e.context(),
            Self::Decode(e) => e.context(),
            Self::Issue(e) => e.context(),
            Self::Busy => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Configuration(e) => e.suggestions(),
            Self::Provider(e) => e.suggestions(),
            Self::Decode(e) => e.suggestions(),
            Self::Issue(e) => e.suggestions(),
            Self::Busy => vec!["Wait for the current request to finish".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Provider(_) => ErrorCategory::Provider,
            Self::Decode(_) => ErrorCategory::Session,
            Self::Issue(_) => ErrorCategory::Input,
            Self::Busy => ErrorCategory::Concurrency,
        }
    }
}
