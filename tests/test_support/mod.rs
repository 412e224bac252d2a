#![allow(dead_code)]

use async_trait::async_trait;
use legal_advisor::{GenerationParams, LlmBackend, LlmError, LlmInvocation, LlmResult};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

/// In-process backend replaying canned replies and recording every prompt.
#[derive(Default)]
pub(crate) struct StubBackend {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<LlmInvocation>>,
    hold_next: AtomicBool,
    pub entered: Notify,
    pub release: Notify,
}

impl StubBackend {
    pub(crate) fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stub = Self::default();
        for reply in replies {
            stub.push(Ok(reply.into()));
        }
        stub
    }

    pub(crate) fn push(&self, reply: Result<String, LlmError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    /// Make the next call wait on [`StubBackend::release`] after signalling
    /// [`StubBackend::entered`].
    pub(crate) fn hold_next_call(&self) {
        self.hold_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<LlmInvocation> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_params(&self) -> Option<GenerationParams> {
        self.calls.lock().unwrap().last().map(|inv| inv.params)
    }
}

#[async_trait]
impl LlmBackend for StubBackend {
    async fn invoke(&self, inv: LlmInvocation) -> Result<LlmResult, LlmError> {
        self.calls.lock().unwrap().push(inv);

        if self.hold_next.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()));
        reply.map(|text| LlmResult::new(text, "stub", "stub-model"))
    }
}

pub(crate) const LEASE_ISSUE: &str =
    "전세 계약이 끝났는데 임대인이 보증금 5천만원을 돌려주지 않고 연락을 피하고 있습니다";

pub(crate) fn well_formed_reply() -> String {
    serde_json::json!({
        "category": "부동산/임대차",
        "summary": "임대차 계약 종료 후 보증금 반환이 지연되고 있습니다.",
        "legalAnalysis": [
            { "title": "주택임대차보호법 제3조", "content": "대항력 요건을 검토해야 합니다." }
        ],
        "recommendations": [
            { "title": "내용증명 발송", "content": "1. 반환 요구 2. 기한 명시 3. 법적 조치 예고" }
        ],
        "nextSteps": "임차권등기명령을 신청하세요."
    })
    .to_string()
}
