use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use super::{ChatMessage, CompletionModel, LLMError, StreamChunk};
use crate::config::{LLMConfig, DEFAULT_MAX_TOKENS};

/// OpenAI-compatible chat completions client.
///
/// Works with any provider that implements the OpenAI chat completions API,
/// including streaming via server-sent events.
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    client: Client,
}

impl OpenAIClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., "https://api.openai.com/v1")
    /// * `api_key` - The API key (can be empty for local providers)
    /// * `model` - The model name (e.g., "gpt-4o")
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: Client::new(),
        }
    }

    /// Creates a client from configuration.
    ///
    /// A missing API key is not an error here; the provider rejects the
    /// first unauthenticated request instead.
    pub fn from_config(config: &LLMConfig) -> Self {
        Self::new(
            config.base_url_or_default(),
            config.api_key_or_env().unwrap_or_default(),
            config.model_or_default(),
        )
        .with_max_tokens(config.max_tokens)
    }

    /// Sets the maximum tokens for responses.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_builder(&self, request: &ChatRequest) -> reqwest::RequestBuilder {
        let url = format!("{}/chat/completions", self.base_url);

        let mut req = self
            .client
            .post(&url)
            .header("content-type", "application/json");

        // Only add authorization if api_key is not empty
        if !self.api_key.is_empty() {
            req = req.header("authorization", format!("Bearer {}", self.api_key));
        }

        req.json(request)
    }

    async fn send_request(&self, messages: &[ChatMessage]) -> Result<String, LLMError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: Some(self.max_tokens),
            stream: None,
        };

        debug!(model = %self.model, "sending completion request");
        let response = self.request_builder(&request).send().await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LLMError::ParseError(e.to_string()))?;

        // Extract content from first choice
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }

    /// Send a streaming request and forward deltas through the channel.
    async fn send_streaming_request(
        &self,
        messages: &[ChatMessage],
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), LLMError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            max_tokens: Some(self.max_tokens),
            stream: Some(true),
        };

        debug!(model = %self.model, "sending streaming completion request");
        let response = self.request_builder(&request).send().await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        // Process SSE stream
        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| LLMError::Network(e.to_string()))?;
            let chunk_str = String::from_utf8_lossy(&chunk);
            buffer.push_str(&chunk_str);

            // Process complete SSE events from buffer
            while let Some(pos) = buffer.find("\n\n") {
                let event_data = buffer[..pos].to_string();
                buffer = buffer[pos + 2..].to_string();

                if let Some(text) = parse_sse_event(&event_data) {
                    let _ = tx.send(StreamChunk::text(text));
                }
            }
        }

        // Send final chunk
        let _ = tx.send(StreamChunk::done());
        Ok(())
    }
}

#[async_trait]
impl CompletionModel for OpenAIClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LLMError> {
        self.send_request(messages).await
    }

    async fn stream_complete(
        &self,
        messages: &[ChatMessage],
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), LLMError> {
        self.send_streaming_request(messages, tx).await
    }

    fn supports_streaming(&self) -> bool {
        true
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Parse an OpenAI SSE event and extract the content delta.
///
/// OpenAI streaming format:
/// ```text
/// data: {"choices":[{"delta":{"content":"Hello"}}]}
/// data: [DONE]
/// ```
///
/// Returns `None` for keep-alives, the `[DONE]` sentinel, and events that
/// carry no content (e.g. the initial role-only delta).
fn parse_sse_event(event_data: &str) -> Option<String> {
    let mut data_line = None;

    for line in event_data.lines() {
        if let Some(stripped) = line.strip_prefix("data: ") {
            data_line = Some(stripped.trim());
        }
    }

    let data = data_line?;

    if data == "[DONE]" {
        return None;
    }

    #[derive(Deserialize)]
    struct DeltaEvent {
        choices: Vec<DeltaChoice>,
    }

    #[derive(Deserialize)]
    struct DeltaChoice {
        delta: Delta,
    }

    #[derive(Deserialize)]
    struct Delta {
        #[serde(default)]
        content: String,
    }

    let parsed: DeltaEvent = serde_json::from_str(data).ok()?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.delta.content)
        .unwrap_or_default();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new("https://api.example.com/v1", "test-key", "gpt-4o");
        assert_eq!(client.base_url, "https://api.example.com/v1");
        assert_eq!(client.model, "gpt-4o");
    }

    #[test]
    fn test_url_trailing_slash_removed() {
        let client = OpenAIClient::new("https://api.example.com/v1/", "key", "model");
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_from_config_uses_defaults() {
        let config = LLMConfig {
            api_key: Some("test".to_string()),
            ..LLMConfig::default()
        };
        let client = OpenAIClient::from_config(&config);
        assert_eq!(client.base_url, "https://api.openai.com/v1");
        assert_eq!(client.model, "gpt-4o");
        assert_eq!(client.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_parse_sse_delta() {
        let event = r#"data: {"choices":[{"delta":{"content":"판사: "}}]}"#;
        assert_eq!(parse_sse_event(event), Some("판사: ".to_string()));
    }

    #[test]
    fn test_parse_sse_done_sentinel() {
        assert_eq!(parse_sse_event("data: [DONE]"), None);
    }

    #[test]
    fn test_parse_sse_role_only_delta() {
        let event = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_sse_event(event), None);
    }

    #[test]
    fn test_parse_sse_non_data_event() {
        assert_eq!(parse_sse_event(": keep-alive"), None);
    }
}
