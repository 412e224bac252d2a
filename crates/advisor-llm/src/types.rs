//! Core types for the provider abstraction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use advisor_config::GenerationConfig;
use advisor_utils::error::LlmError;

/// Sampling parameters for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Built-in parameters for the structured analysis request.
    #[must_use]
    pub fn analysis() -> Self {
        GenerationConfig::analysis().into()
    }

    /// Built-in parameters for the expert advice request.
    #[must_use]
    pub fn expert() -> Self {
        GenerationConfig::expert().into()
    }
}

impl From<GenerationConfig> for GenerationParams {
    fn from(config: GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Input to a backend invocation
#[derive(Debug, Clone, PartialEq)]
pub struct LlmInvocation {
    /// The single prompt sent to the provider.
    pub prompt: String,
    pub params: GenerationParams,
}

impl LlmInvocation {
    #[must_use]
    pub fn new(prompt: impl Into<String>, params: GenerationParams) -> Self {
        Self {
            prompt: prompt.into(),
            params,
        }
    }
}

/// Result from a backend invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResult {
    /// Generated text; empty when the provider returned none.
    pub text: String,
    /// Provider name (e.g. "gemini")
    pub provider: String,
    pub model_used: String,
    pub tokens_input: Option<u64>,
    pub tokens_output: Option<u64>,
    /// Provider finish reason, when reported
    pub finish_reason: Option<String>,
}

impl LlmResult {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        provider: impl Into<String>,
        model_used: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            provider: provider.into(),
            model_used: model_used.into(),
            tokens_input: None,
            tokens_output: None,
            finish_reason: None,
        }
    }

    #[must_use]
    pub fn with_tokens(mut self, input: Option<u64>, output: Option<u64>) -> Self {
        self.tokens_input = input;
        self.tokens_output = output;
        self
    }

    #[must_use]
    pub fn with_finish_reason(mut self, reason: Option<String>) -> Self {
        self.finish_reason = reason;
        self
    }
}

/// Trait for provider backends
///
/// Each call is a single request with no retry; failures surface
/// immediately and retrying is left to the user.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Invoke the provider with one prompt.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` for transport failures and non-success statuses.
    async fn invoke(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError>;
}
