//! Shared HTTP client for HTTP-based providers
//!
//! One `reqwest::Client` per backend, configured with a connect timeout.
//! Requests are sent exactly once; the user decides whether to retry.

use advisor_utils::error::LlmError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest provider error body kept in `LlmError::Provider`.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone)]
pub(crate) struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a client with the given connect timeout.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Transport` if the client cannot be constructed.
    pub fn new(connect_timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// POST a JSON body and return the successful response body text.
    ///
    /// # Errors
    ///
    /// - `LlmError::Transport` when the request cannot be sent or the body
    ///   cannot be read
    /// - `LlmError::Provider` for any non-success status, carrying the
    ///   redacted response body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &B,
        provider_name: &str,
    ) -> Result<String, LlmError> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            LlmError::Transport(format!(
                "{provider_name} request failed: {}",
                redact_error_message(&e.to_string())
            ))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            LlmError::Transport(format!(
                "Failed to read {provider_name} response: {}",
                redact_error_message(&e.to_string())
            ))
        })?;

        if !status.is_success() {
            warn!(
                provider = provider_name,
                status = status.as_u16(),
                "Provider returned non-success status"
            );
            return Err(LlmError::Provider {
                status: status.as_u16(),
                message: truncate(&redact_error_message(&text), MAX_ERROR_BODY_CHARS),
            });
        }

        debug!(
            provider = provider_name,
            status = status.as_u16(),
            body_bytes = text.len(),
            "Provider response received"
        );

        Ok(text)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Pattern to match URLs with embedded credentials
static URL_WITH_CREDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://)[^:@\s]+:[^@\s]+@").unwrap());

/// Query-string API keys, as Gemini accepts `?key=...`
static KEY_QUERY_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());

/// Long alphanumeric runs that may be API keys
static POTENTIAL_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9_-]{32,}\b").unwrap());

/// Redact credentials from a message before it is logged or returned.
///
/// - URLs with embedded credentials keep only the scheme
/// - `key=` query parameters lose their value
/// - Runs of 32+ key-like characters become `[REDACTED_KEY]`
#[must_use]
pub fn redact_error_message(message: &str) -> String {
    let redacted = URL_WITH_CREDS.replace_all(message, "$1[REDACTED]@");
    let redacted = KEY_QUERY_PARAM.replace_all(&redacted, "$1[REDACTED]");
    let redacted = POTENTIAL_KEY.replace_all(&redacted, "[REDACTED_KEY]");
    redacted.into_owned()
}
