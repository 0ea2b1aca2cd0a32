use crate::llm::ChatMessage;

/// Fixed instruction for the advisory panel: composition, working rules, and
/// the judge's reporting duty. Not configurable.
pub const PANEL_SYSTEM_PROMPT: &str = "당신은 법률 자문 AI 팀의 일원입니다. 팀은 판사, 검사, 변호사 1, 변호사 2 (시니어), 법학 교수로 구성되어 있습니다. 팀원은 수직적 관계가 아닌 수평적 관계로 최선의 목적을 달성하기위해 서로 의견을 주고받고 , 판사는 사용자에게 최종보고서를 이해하기 쉽도록 다양한 방면으로 편집하여 사용자에게 제출한다.글의 내용은 사실에 입각해서 작성해야하며, 성의없는 몇줄의 글은 제출하지 않는다. 팀원들이 심사숙고 하고 서로 커뮤니케이션을 하며, 회의적인 비판과 결과가 좋지 않을것 같은 내용은 다시 작성해달라고 요청할수 있다. 한마디로 AI 팀원들이 판사의 주도하에 토론을 하는것이다. 토론을 마친후 판사는 회의록을 작성해서 사용자에게 팀원들의 의견을 요약해서 제출하고 최종적으로 판사가 모든 내용을 판단하여 사용자에게 제출한다. 글의 길이는 성의없이 짦게 쓰지 않고 사용자가 납득이 가도록 예시나 기타 관련있는 사실내용 판례를 제출해서 사용자의 이해를 돕는다. 팀원들의 역할을 명확히 한다. 조사는 변호사들이하고, 현재 시점에서 법이 개정되었는지 법리의 오류가 없는지 검사가 확인한다. 판사는 변호가와 검사의 내용을 모두 분석한다. 팀원의 목표는 피해자가 억울하게 당하는것을 막는것이다.";

/// Preamble introducing the search context inside the system message.
const CONTEXT_PREAMBLE: &str = "   다음은 관련된 인터넷 검색 결과입니다:\n\n";

/// Composes the message sequence for one advisory request.
///
/// Always exactly two messages: a system message carrying the fixed panel
/// instruction plus the context block, and a user message carrying the query
/// verbatim. No truncation and no token budgeting; an oversized prompt fails
/// at the completion provider, not here.
pub fn compose_messages(context: &str, user_query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!("{PANEL_SYSTEM_PROMPT}{CONTEXT_PREAMBLE}{context}")),
        ChatMessage::user(user_query),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_exactly_two_messages() {
        let messages = compose_messages("context", "query");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_user_query_is_verbatim() {
        let query = "계약 위반 시 손해배상 청구 방법";
        let messages = compose_messages("", query);
        assert_eq!(messages[1].content, query);
    }

    #[test]
    fn test_system_message_carries_instruction_and_context() {
        let messages = compose_messages("제목: 판례\n내용: ...\nURL: https://example.com", "질문");
        assert!(messages[0].content.starts_with(PANEL_SYSTEM_PROMPT));
        assert!(messages[0].content.ends_with("URL: https://example.com"));
    }
}
