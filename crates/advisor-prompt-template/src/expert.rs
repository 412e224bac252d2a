use advisor_utils::types::{StructuredAdvice, TitledItem};

fn join_items(items: &[TitledItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}: {}", item.title, item.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the follow-up expert-advice prompt.
///
/// Requests free-form prose, not JSON, covering five fixed topics. The
/// prompt forbids greetings and the `**` markup sequence.
#[must_use]
pub fn build_expert_prompt(issue: &str, advice: &StructuredAdvice) -> String {
    format!(
        "당신은 법률 전문가 AI입니다. 아래 법률 문제와 이미 수행된 법률 분석을 검토한 후,
더 전문적인 법률 조언을 제공해주세요.

### 의뢰인의 법률 문제:
{issue}

### 이미 제공된 법률 분석 결과:
- 법률 카테고리: {category}
- 사례 요약: {summary}

- 법률 조항 분석: {analysis}

- 권장 대응 방안: {recommendations}

- 권장 다음 단계: {next_steps}

### 요청사항:
위 정보를 검토하시고, 다음 내용을 포함하는 전문적인 법률 조언을 제공해주세요:

1. 이 사례의 성공 가능성과 위험 요소
2. 법원이나 상대방이 어떻게 반응할지에 대한 현실적 예측
3. 전략적 접근법 (협상, 소송, 대안적 분쟁 해결 등)
4. 의뢰인이 놓치고 있을 수 있는 중요한 법적 고려사항
5. 최적의 결과를 얻기 위한 구체적인 행동 계획

중요한 지침:
- 어떤 형태의 도입부나 인사말도 포함하지 마세요. 바로 조언 내용으로 시작하세요.
- 별표(**)나 기타 특수 포맷팅 문자를 사용하지 마세요.
- 각 주제별로 소제목을 사용하되, 번호 매김이나 글머리 기호를 사용하세요.
- 실용적이고 이해하기 쉬운 언어로 설명해주세요.
- 각 섹션은 명확히 구분되어야 하지만 특수 문자 없이 자연스럽게 표현하세요.
",
        category = advice.category,
        summary = advice.summary,
        analysis = join_items(&advice.legal_analysis),
        recommendations = join_items(&advice.recommendations),
        next_steps = advice.next_steps,
    )
}
