//! Advisor facade against an in-process backend.

mod test_support;

use legal_advisor::{
    AdviceError, Advisor, AnswerSet, Config, EXPERT_ADVICE_FALLBACK, IssueError, LlmError,
    MemoryStore, SegmentationEvent, SegmentationObserver, SessionError, StructuredAdvice,
    TitledItem, session,
};
use std::sync::{Arc, Mutex};
use test_support::{LEASE_ISSUE, StubBackend, well_formed_reply};

fn advisor_with(backend: &Arc<StubBackend>) -> Advisor {
    Advisor::with_backend(backend.clone(), &Config::default())
}

fn sample_advice() -> StructuredAdvice {
    StructuredAdvice {
        category: "부동산/임대차".to_string(),
        summary: "보증금 미반환 사안".to_string(),
        legal_analysis: vec![TitledItem::new("주택임대차보호법", "대항력과 우선변제권")],
        recommendations: vec![TitledItem::new("지급명령", "법원에 지급명령을 신청")],
        next_steps: "증거를 정리하세요.".to_string(),
    }
}

#[tokio::test]
async fn test_analyze_parses_well_formed_reply() {
    let backend = Arc::new(StubBackend::replying([well_formed_reply()]));
    let advisor = advisor_with(&backend);

    let answers = AnswerSet::new()
        .with("amount", "5천만원")
        .with("incidentDate", "2024-03-01");
    let advice = advisor.analyze(LEASE_ISSUE, &answers).await.unwrap();

    assert_eq!(advice.category, "부동산/임대차");
    assert_eq!(advice.legal_analysis[0].title, "주택임대차보호법 제3조");
    assert_eq!(advice.next_steps, "임차권등기명령을 신청하세요.");

    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains(LEASE_ISSUE));
    assert!(calls[0].prompt.contains("5천만원"));
    assert!(calls[0].prompt.contains("2024-03-01"));
    assert!((calls[0].params.temperature - 0.2).abs() < f32::EPSILON);
}

#[tokio::test]
async fn test_analyze_fenced_reply() {
    let reply = format!("분석 결과입니다.\n```json\n{}\n```\n감사합니다.", well_formed_reply());
    let backend = Arc::new(StubBackend::replying([reply]));
    let advice = advisor_with(&backend)
        .analyze(LEASE_ISSUE, &AnswerSet::new())
        .await
        .unwrap();
    assert_eq!(advice.summary, "임대차 계약 종료 후 보증금 반환이 지연되고 있습니다.");
}

#[tokio::test]
async fn test_analyze_prose_reply_is_synthesized() {
    let prose = [
        "임대인이 보증금을 반환하지 않는 경우 임차인은 여러 법적 수단을 사용할 수 있습니다. 영수증과 송금 내역을 먼저 확인하세요.",
        "주택임대차보호법에 따라 임차권등기명령을 신청하면 이사 후에도 대항력을 유지할 수 있습니다.",
        "내용증명으로 반환을 요구한 뒤 지급명령이나 소송을 검토하세요.",
        "변호사나 법률구조공단의 상담을 받아보세요.",
    ]
    .join("\n\n");
    let backend = Arc::new(StubBackend::replying([prose]));
    let advice = advisor_with(&backend)
        .analyze(LEASE_ISSUE, &AnswerSet::new())
        .await
        .unwrap();

    assert_eq!(advice.category, "부동산/임대차");
    assert!(advice.summary.starts_with("임대인이 보증금을"));
    assert!(!advice.legal_analysis.is_empty());
    assert!(!advice.recommendations.is_empty());
    assert!(!advice.next_steps.is_empty());
}

#[tokio::test]
async fn test_analyze_empty_reply_yields_error_shape() {
    let backend = Arc::new(StubBackend::replying([""]));
    let advice = advisor_with(&backend)
        .analyze(LEASE_ISSUE, &AnswerSet::new())
        .await
        .unwrap();
    assert!(advice.summary.contains(LEASE_ISSUE));
}

#[tokio::test]
async fn test_analyze_rejects_short_issue_without_calling_provider() {
    let backend = Arc::new(StubBackend::default());
    let err = advisor_with(&backend)
        .analyze("임대", &AnswerSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdviceError::Issue(IssueError::TooShort { .. })));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_provider_error_surfaces() {
    let backend = Arc::new(StubBackend::default());
    backend.push(Err(LlmError::Provider {
        status: 500,
        message: "internal".to_string(),
    }));
    let err = advisor_with(&backend)
        .analyze(LEASE_ISSUE, &AnswerSet::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AdviceError::Provider(LlmError::Provider { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_analyze_session_uses_stored_answers() {
    let backend = Arc::new(StubBackend::replying([well_formed_reply()]));
    let advisor = advisor_with(&backend);

    let mut store = MemoryStore::new();
    session::record_issue(&mut store, LEASE_ISSUE).unwrap();
    let selected = std::collections::BTreeSet::from(["incidentDate"]);
    let answers = AnswerSet::new().with("incidentDate", "2024-05-31");
    session::record_answers(&mut store, LEASE_ISSUE, &answers, &selected).unwrap();

    advisor.analyze_session(&store).await.unwrap();
    let prompt = &backend.calls()[0].prompt;
    assert!(prompt.contains(LEASE_ISSUE));
    assert!(prompt.contains("2024-05-31"));
}

#[tokio::test]
async fn test_analyze_session_without_data_is_decode_error() {
    let backend = Arc::new(StubBackend::default());
    let err = advisor_with(&backend)
        .analyze_session(&MemoryStore::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdviceError::Decode(SessionError::NoData { .. })));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_expert_advice_uses_expert_params() {
    let backend = Arc::new(StubBackend::replying(["성공 가능성: 높음\n증거가 충분합니다."]));
    let advisor = advisor_with(&backend);

    let text = advisor.expert_advice(LEASE_ISSUE, &sample_advice()).await.unwrap();
    assert_eq!(text, "성공 가능성: 높음\n증거가 충분합니다.");

    let params = backend.last_params().unwrap();
    assert!((params.temperature - 0.4).abs() < f32::EPSILON);
    let prompt = &backend.calls()[0].prompt;
    assert!(prompt.contains("주택임대차보호법: 대항력과 우선변제권"));
    assert!(prompt.contains("**"));
}

#[tokio::test]
async fn test_expert_advice_empty_reply_uses_fallback() {
    let backend = Arc::new(StubBackend::replying([""]));
    let text = advisor_with(&backend)
        .expert_advice(LEASE_ISSUE, &sample_advice())
        .await
        .unwrap();
    assert_eq!(text, EXPERT_ADVICE_FALLBACK);
}

#[tokio::test]
async fn test_expert_advice_rejects_concurrent_request() {
    let backend = Arc::new(StubBackend::replying(["첫 번째 조언", "두 번째 조언"]));
    backend.hold_next_call();
    let advisor = Arc::new(advisor_with(&backend));

    let first = tokio::spawn({
        let advisor = advisor.clone();
        async move { advisor.expert_advice(LEASE_ISSUE, &sample_advice()).await }
    });
    backend.entered.notified().await;
    assert!(advisor.is_expert_busy());

    let err = advisor
        .expert_advice(LEASE_ISSUE, &sample_advice())
        .await
        .unwrap_err();
    assert!(matches!(err, AdviceError::Busy));

    backend.release.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), "첫 번째 조언");
    assert!(!advisor.is_expert_busy());

    let again = advisor.expert_advice(LEASE_ISSUE, &sample_advice()).await;
    assert_eq!(again.unwrap(), "두 번째 조언");
}

#[tokio::test]
async fn test_busy_flag_released_after_failure_and_cancellation() {
    let backend = Arc::new(StubBackend::default());
    backend.push(Err(LlmError::Transport("connection reset".to_string())));
    let advisor = Arc::new(advisor_with(&backend));

    let err = advisor
        .expert_advice(LEASE_ISSUE, &sample_advice())
        .await
        .unwrap_err();
    assert!(matches!(err, AdviceError::Provider(_)));
    assert!(!advisor.is_expert_busy());

    backend.hold_next_call();
    let pending = tokio::spawn({
        let advisor = advisor.clone();
        async move { advisor.expert_advice(LEASE_ISSUE, &sample_advice()).await }
    });
    backend.entered.notified().await;
    assert!(advisor.is_expert_busy());

    pending.abort();
    assert!(pending.await.unwrap_err().is_cancelled());
    assert!(!advisor.is_expert_busy());
}

#[test]
fn test_expert_sections_split_reply() {
    let backend = Arc::new(StubBackend::default());
    let advisor = advisor_with(&backend);
    let sections = advisor.expert_sections(
        "성공 가능성: 높음\n계약서가 있습니다.\n송금 내역도 있습니다.\n위험 요소\n임대인의 재산이 없을 수 있습니다.",
    );
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "성공 가능성: 높음");
    assert_eq!(sections[0].content.len(), 2);
    assert_eq!(sections[1].title, "위험 요소");
    assert_eq!(sections[1].content.len(), 1);
}

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<SegmentationEvent>>,
}

impl SegmentationObserver for RecordingObserver {
    fn on_event(&self, event: &SegmentationEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[test]
fn test_expert_sections_report_to_observer() {
    let observer = Arc::new(RecordingObserver::default());
    let advisor = advisor_with(&Arc::new(StubBackend::default())).with_observer(observer.clone());

    advisor.expert_sections("협상 전략:\n내용증명을 먼저 보내세요.");
    advisor.expert_sections("성공 가능성\n위험 요소");

    let events = observer.events.lock().unwrap();
    assert_eq!(
        *events,
        [
            SegmentationEvent::Sections {
                count: 1,
                fallback: false
            },
            SegmentationEvent::Sections {
                count: 1,
                fallback: true
            },
        ]
    );
}

#[test]
fn test_from_config_without_key_is_configuration_error() {
    let mut config = Config::default();
    config.provider.api_key_env = "LEGAL_ADVISOR_FACADE_TEST_UNSET".to_string();
    let err = Advisor::from_config(&config).unwrap_err();
    assert!(matches!(err, AdviceError::Configuration(_)));
}

#[tokio::test]
async fn test_configured_generation_params_reach_backend() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_dir = dir.path().join(".legal-advisor");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[analysis]\ntemperature = 0.1\nmax_output_tokens = 2048\n\n[expert]\ntop_k = 20\n",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();

    let config = Config::discover_from(dir.path()).unwrap();
    let backend = Arc::new(StubBackend::replying([well_formed_reply(), "조언".to_string()]));
    let advisor = Advisor::with_backend(backend.clone(), &config);

    advisor.analyze(LEASE_ISSUE, &AnswerSet::new()).await.unwrap();
    let analysis = backend.last_params().unwrap();
    assert!((analysis.temperature - 0.1).abs() < f32::EPSILON);
    assert_eq!(analysis.max_output_tokens, 2048);

    advisor.expert_advice(LEASE_ISSUE, &sample_advice()).await.unwrap();
    let expert = backend.last_params().unwrap();
    assert_eq!(expert.top_k, 20);
    assert!((expert.temperature - 0.4).abs() < f32::EPSILON);
}
