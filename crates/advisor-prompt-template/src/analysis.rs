use advisor_utils::types::AnswerSet;

/// Placeholder for an unanswered question.
pub const NOT_SPECIFIED: &str = "명시되지 않음";

/// Placeholder for empty `additionalInfo`.
pub const NO_ADDITIONAL_INFO: &str = "추가 정보 없음";

const RESPONSE_SCHEMA: &str = r#"{
  "category": "법률 카테고리",
  "summary": "사례 요약",
  "legalAnalysis": [
    {
      "title": "관련 법률 조항",
      "content": "법률 조항 설명"
    },
    {
      "title": "관련 판례 및 사례",
      "content": "판례 및 사례 설명"
    }
  ],
  "recommendations": [
    {
      "title": "법적 대응 방안",
      "content": "대응 방안 설명"
    },
    {
      "title": "필요 서류 및 증거",
      "content": "필요 서류 설명"
    },
    {
      "title": "전문가 상담 필요성",
      "content": "전문가 상담 필요성 설명"
    }
  ],
  "nextSteps": "권장 다음 단계"
}"#;

/// Build the structured-analysis prompt.
///
/// The issue is embedded as given; callers validate it beforehand.
/// Unanswered questions become [`NOT_SPECIFIED`], except `additionalInfo`
/// which becomes [`NO_ADDITIONAL_INFO`]. Downstream stages cannot tell a
/// placeholder from a real answer.
#[must_use]
pub fn build_analysis_prompt(issue: &str, answers: &AnswerSet) -> String {
    let answer = |key: &str| answers.get(key).unwrap_or(NOT_SPECIFIED);
    let additional_info = answers.get("additionalInfo").unwrap_or(NO_ADDITIONAL_INFO);

    format!(
        "당신은 전문 법률 조언 시스템입니다. 아래 사용자가 제공한 법률 문제와 관련 정보를 분석하고,
법률적 조언과 해결책을 제시해주세요.

### 사용자 제공 정보:
- 주요 법률 문제: {issue}
- 사건 발생일: {incident_date}
- 관련 금액: {amount}
- 해결 시도: {attempts}
- 희망 결과: {desired_outcome}
- 추가 정보: {additional_info}

### 중요 지시사항:
반드시 다음 JSON 형식으로만 응답해주세요. 다른 어떤 형식의 응답이나 설명도 포함하지 마세요.
어떤 경우에도 응답은 항상 아래 형식의 유효한 JSON 객체여야 합니다.

### 요청사항:
1. 해당 사례가 어떤 법률 카테고리에 해당하는지 판단해주세요 (예: 계약 관련 분쟁, 부동산/임대차, 노동/근로 관계, 상속/유언 등).
2. 사용자가 제공한 정보를 요약해주세요.
3. 관련 법률 조항과 판례를 분석해주세요.
4. 법적 대응 방안, 필요 서류 및 증거, 전문가 상담 필요성에 대한 구체적인 조언을 제공해주세요.
5. 다음 단계에 대한 추천 사항을 제시해주세요.

### 응답 형식:
{RESPONSE_SCHEMA}
",
        incident_date = answer("incidentDate"),
        amount = answer("amount"),
        attempts = answer("attempts"),
        desired_outcome = answer("desiredOutcome"),
    )
}
