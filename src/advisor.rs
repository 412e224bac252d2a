//! The advisor facade: config, provider, prompts, and normalization wired
//! together.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use advisor_config::Config;
use advisor_extraction::normalize_detailed;
use advisor_llm::{GeminiBackend, GenerationParams, LlmBackend, fetch_completion};
use advisor_prompt_template::{build_analysis_prompt, build_expert_prompt, validate_issue};
use advisor_segmentation::{SegmentationObserver, TracingObserver, split_sections_with};
use advisor_session::{SessionStore, load_for_result};
use advisor_utils::error::{AdviceError, SessionError};
use advisor_utils::types::{AdviceSection, AnswerSet, StructuredAdvice};

/// Shown in place of an empty expert-advice reply.
pub const EXPERT_ADVICE_FALLBACK: &str = "전문 변호사 조언을 생성하는 중 오류가 발생했습니다.";

/// Entry point for analysis and expert advice.
///
/// Each call sends one provider request and never retries. At most one
/// expert-advice request runs at a time; a second one is rejected with
/// [`AdviceError::Busy`] rather than queued.
pub struct Advisor {
    backend: Arc<dyn LlmBackend>,
    analysis: GenerationParams,
    expert: GenerationParams,
    observer: Arc<dyn SegmentationObserver>,
    expert_busy: AtomicBool,
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("analysis", &self.analysis)
            .field("expert", &self.expert)
            .field("expert_busy", &self.expert_busy.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl Advisor {
    /// Build an advisor backed by the Gemini provider.
    ///
    /// # Errors
    ///
    /// Returns `AdviceError::Configuration` if the API key is missing or a
    /// placeholder.
    pub fn from_config(config: &Config) -> Result<Self, AdviceError> {
        let backend = GeminiBackend::new_from_config(config)?;
        info!(
            model = %backend.model(),
            source = %config.source,
            "Advisor configured"
        );
        Ok(Self::with_backend(Arc::new(backend), config))
    }

    /// Build an advisor around any backend, taking generation parameters
    /// from `config`.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn LlmBackend>, config: &Config) -> Self {
        Self {
            backend,
            analysis: config.analysis.into(),
            expert: config.expert.into(),
            observer: Arc::new(TracingObserver),
            expert_busy: AtomicBool::new(false),
        }
    }

    /// Replace the observer receiving segmentation events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SegmentationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Analyze an issue with its clarifying answers.
    ///
    /// # Errors
    ///
    /// - `AdviceError::Issue` if the issue text is rejected
    /// - `AdviceError::Provider` if the provider call fails
    pub async fn analyze(
        &self,
        issue: &str,
        answers: &AnswerSet,
    ) -> Result<StructuredAdvice, AdviceError> {
        validate_issue(issue)?;

        let prompt = build_analysis_prompt(issue, answers);
        let raw = fetch_completion(self.backend.as_ref(), prompt, self.analysis).await?;
        let normalized = normalize_detailed(&raw, issue);

        info!(
            category = %normalized.advice.category,
            path = %normalized.path,
            synthesized = normalized.synthesized,
            "Analysis completed"
        );
        Ok(normalized.advice)
    }

    /// Analyze the issue and answers stored in a session.
    ///
    /// # Errors
    ///
    /// Returns `AdviceError::Decode` when the session holds no usable answer
    /// object, plus everything [`Advisor::analyze`] returns.
    pub async fn analyze_session(
        &self,
        store: &dyn SessionStore,
    ) -> Result<StructuredAdvice, AdviceError> {
        let answers = load_for_result(store)?;
        let issue = answers
            .main_issue()
            .ok_or(SessionError::MissingIssue)?
            .to_string();
        self.analyze(&issue, &answers).await
    }

    /// Request free-form expert advice on an analyzed issue.
    ///
    /// An empty reply becomes [`EXPERT_ADVICE_FALLBACK`].
    ///
    /// # Errors
    ///
    /// - `AdviceError::Busy` while another expert request is outstanding
    /// - `AdviceError::Provider` if the provider call fails
    pub async fn expert_advice(
        &self,
        issue: &str,
        advice: &StructuredAdvice,
    ) -> Result<String, AdviceError> {
        let _guard = BusyGuard::acquire(&self.expert_busy).ok_or(AdviceError::Busy)?;

        let prompt = build_expert_prompt(issue, advice);
        let text = fetch_completion(self.backend.as_ref(), prompt, self.expert).await?;

        if text.is_empty() {
            debug!("Expert advice reply was empty");
            return Ok(EXPERT_ADVICE_FALLBACK.to_string());
        }
        Ok(text)
    }

    /// Whether an expert-advice request is outstanding.
    #[must_use]
    pub fn is_expert_busy(&self) -> bool {
        self.expert_busy.load(Ordering::Acquire)
    }

    /// Split an expert-advice reply into titled sections.
    #[must_use]
    pub fn expert_sections(&self, text: &str) -> Vec<AdviceSection> {
        split_sections_with(text, self.observer.as_ref())
    }
}

/// Holds the busy flag; clears it on drop, including when the owning
/// future is dropped mid-request.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_guard_is_exclusive_and_released() {
        let flag = AtomicBool::new(false);
        let first = BusyGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(BusyGuard::acquire(&flag).is_none());
        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
