//! Gemini `generateContent` backend

use advisor_config::Config;
use advisor_utils::error::{AdviceError, LlmError};
use advisor_utils::logging::mask_secret;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::http_client::HttpClient;
use crate::types::{GenerationParams, LlmBackend, LlmInvocation, LlmResult};

/// Provider name reported in results and logs.
pub const GEMINI_PROVIDER: &str = "gemini";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiBackend {
    client: HttpClient,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("endpoint", &self.endpoint)
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiBackend {
    /// Create a backend posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Transport` if the HTTP client cannot be constructed.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        connect_timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: HttpClient::new(connect_timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Create a backend from configuration, resolving the API key from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `AdviceError::Configuration` if the key is absent or a
    /// placeholder, and `AdviceError::Provider` if the HTTP client cannot be
    /// built.
    pub fn new_from_config(config: &Config) -> Result<Self, AdviceError> {
        let api_key = config.resolve_api_key()?;
        let backend = Self::new(
            api_key,
            config.provider.endpoint(),
            config.provider.model.clone(),
            Duration::from_secs(config.provider.connect_timeout_secs),
        )?;
        Ok(backend)
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn invoke(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError> {
        debug!(
            provider = GEMINI_PROVIDER,
            model = %self.model,
            endpoint = %self.endpoint,
            temperature = inv.params.temperature,
            prompt_chars = inv.prompt.chars().count(),
            "Invoking Gemini backend"
        );

        let request_body = GeminiRequest::new(&inv.prompt, inv.params);
        let body = self
            .client
            .post_json(
                &self.endpoint,
                &[(API_KEY_HEADER, self.api_key.as_str())],
                &request_body,
                GEMINI_PROVIDER,
            )
            .await?;

        let result = parse_response(&body, &self.model)?;

        debug!(
            provider = GEMINI_PROVIDER,
            model = %self.model,
            text_chars = result.text.chars().count(),
            tokens_input = ?result.tokens_input,
            tokens_output = ?result.tokens_output,
            finish_reason = ?result.finish_reason,
            "Gemini invocation completed"
        );

        Ok(result)
    }
}

/// Parse a successful Gemini envelope; a missing text path yields "".
fn parse_response(body: &str, model: &str) -> Result<LlmResult, LlmError> {
    let response: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse Gemini response: {e}")))?;

    let first = response.candidates.into_iter().next();
    let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
    let text = first
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default();

    let (tokens_input, tokens_output) = response
        .usage_metadata
        .map_or((None, None), |u| (u.prompt_token_count, u.candidates_token_count));

    Ok(LlmResult::new(text, GEMINI_PROVIDER, model)
        .with_tokens(tokens_input, tokens_output)
        .with_finish_reason(finish_reason))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: [GeminiContent<'a>; 1],
    generation_config: GenerationParams,
}

impl<'a> GeminiRequest<'a> {
    fn new(prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            contents: [GeminiContent {
                parts: [GeminiRequestPart { text: prompt }],
            }],
            generation_config: params,
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: [GeminiRequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
}
