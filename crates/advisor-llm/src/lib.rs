//! Language-model provider backends
//!
//! The advisor talks to its provider through [`LlmBackend`]. The only
//! production backend is [`GeminiBackend`]; tests and alternative
//! providers supply their own implementations.

mod gemini_backend;
mod http_client;
mod types;

pub use advisor_utils::error::LlmError;
pub use gemini_backend::{GEMINI_PROVIDER, GeminiBackend};
pub use http_client::redact_error_message;
pub use types::{GenerationParams, LlmBackend, LlmInvocation, LlmResult};

/// Send one prompt and return the generated text.
///
/// An absent text in the provider reply is an empty string, not an error.
///
/// # Errors
///
/// Returns `LlmError` when the provider cannot be reached or answers with
/// a non-success status.
pub async fn fetch_completion(
    backend: &dyn LlmBackend,
    prompt: impl Into<String>,
    params: GenerationParams,
) -> Result<String, LlmError> {
    let result = backend.invoke(LlmInvocation::new(prompt, params)).await?;
    Ok(result.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl LlmBackend for Echo {
        async fn invoke(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError> {
            Ok(LlmResult::new(
                format!("{}@{}", inv.prompt, inv.params.temperature),
                "echo",
                "echo-1",
            ))
        }
    }

    #[tokio::test]
    async fn test_fetch_completion_returns_text() {
        let text = fetch_completion(&Echo, "안녕", GenerationParams::expert())
            .await
            .unwrap();
        assert_eq!(text, "안녕@0.4");
    }
}
