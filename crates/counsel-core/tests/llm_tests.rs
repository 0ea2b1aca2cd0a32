use counsel_core::{ChatMessage, LLMConfig, OpenAIClient, StreamChunk};

// OpenAI client tests

#[test]
fn test_client_creation() {
    let _client = OpenAIClient::new("https://api.example.com/v1", "test-key", "gpt-4o");
}

#[test]
fn test_client_from_config() {
    let config = LLMConfig {
        model: Some("gpt-4o-mini".to_string()),
        base_url: Some("http://localhost:8080/v1".to_string()),
        api_key: Some("test".to_string()),
        max_tokens: 1024,
    };
    let _client = OpenAIClient::from_config(&config);
}

#[test]
fn test_url_trailing_slash_removed() {
    let _client = OpenAIClient::new("https://api.example.com/v1/", "key", "model");
}

// Message and chunk tests

#[test]
fn test_chat_message_roles() {
    assert_eq!(ChatMessage::system("a").role, "system");
    assert_eq!(ChatMessage::user("b").role, "user");
}

#[test]
fn test_chat_message_serialization() {
    let message = ChatMessage::user("계약 위반");
    let json = serde_json::to_string(&message).unwrap();
    assert_eq!(json, r#"{"role":"user","content":"계약 위반"}"#);
}

#[test]
fn test_stream_chunk_final_flag() {
    assert!(!StreamChunk::text("x").is_final);
    assert!(StreamChunk::done().is_final);
    assert!(StreamChunk::done().text.is_empty());
}
