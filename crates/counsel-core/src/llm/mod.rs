mod error;
mod openai;

pub use error::LLMError;
pub use openai::OpenAIClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A single message in a chat completion request.
///
/// Exactly two messages are sent per advisory request: one `system` message
/// carrying the panel instruction plus the search context, one `user` message
/// carrying the verbatim query. No conversation history is retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chunk of streamed response from the completion provider.
#[derive(Debug, Clone)]
pub struct StreamChunk {
    /// The text content of this chunk.
    pub text: String,
    /// Whether this is the final chunk.
    pub is_final: bool,
}

impl StreamChunk {
    /// Create a new text chunk.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    /// Create a final (end of stream) chunk.
    pub fn done() -> Self {
        Self {
            text: String::new(),
            is_final: true,
        }
    }
}

/// Trait for completion providers.
///
/// The advisory pipeline only depends on this seam, so the provider can be
/// swapped (or mocked in tests) without touching the rest of the code.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Complete a message sequence and return the full response.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LLMError>;

    /// Stream a completion for a message sequence.
    ///
    /// Sends chunks through the provided channel as they arrive. The final
    /// chunk will have `is_final: true`. On error the stream is aborted and
    /// no final chunk is sent; a partially accumulated response must be
    /// treated as incomplete.
    ///
    /// Default implementation falls back to non-streaming and sends the
    /// entire response as a single chunk.
    async fn stream_complete(
        &self,
        messages: &[ChatMessage],
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), LLMError> {
        // Default: fall back to non-streaming
        let response = self.complete(messages).await?;
        let _ = tx.send(StreamChunk::text(response));
        let _ = tx.send(StreamChunk::done());
        Ok(())
    }

    /// Returns true if this provider supports streaming.
    fn supports_streaming(&self) -> bool {
        false
    }
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl CompletionModel for Box<dyn CompletionModel> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LLMError> {
        (**self).complete(messages).await
    }

    async fn stream_complete(
        &self,
        messages: &[ChatMessage],
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<(), LLMError> {
        (**self).stream_complete(messages, tx).await
    }

    fn supports_streaming(&self) -> bool {
        (**self).supports_streaming()
    }
}
