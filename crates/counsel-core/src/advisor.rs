use thiserror::Error;
use tokio::sync::mpsc;
use tracing::warn;

use crate::context::ContextBuilder;
use crate::llm::{CompletionModel, LLMError, StreamChunk};
use crate::panel::{self, compose_messages, RoleSection};
use crate::search::{SearchClient, SearchResult};

/// A finished advisory: the full response plus its per-role sections.
#[derive(Debug, Clone)]
pub struct Advisory {
    pub full_text: String,
    pub sections: Vec<RoleSection>,
}

/// Errors that abort an advisory request.
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),
}

/// Runs the advisory pipeline for a single user query.
///
/// All configuration is passed in at construction; there is no ambient state
/// shared across requests. Each call to [`advise`](Self::advise) rebuilds the
/// context block and message sequence from scratch.
pub struct AdvisoryRunner<L: CompletionModel> {
    llm: L,
    search: Option<SearchClient>,
    context_builder: ContextBuilder,
}

impl<L: CompletionModel> AdvisoryRunner<L> {
    /// Creates a runner without search grounding.
    pub fn new(llm: L) -> Self {
        Self {
            llm,
            search: None,
            context_builder: ContextBuilder::new(),
        }
    }

    /// Attaches a search client for grounding the system prompt.
    pub fn with_search(mut self, search: SearchClient) -> Self {
        self.search = Some(search);
        self
    }

    /// Replaces the context builder.
    pub fn with_context_builder(mut self, context_builder: ContextBuilder) -> Self {
        self.context_builder = context_builder;
        self
    }

    /// Runs one advisory request.
    ///
    /// Every fragment is forwarded to `tx` as it arrives so a consumer can
    /// render progressively; a final chunk is sent once the stream completes.
    /// The accumulated text is partitioned only after the stream ends.
    ///
    /// A search failure degrades to an empty context block and the advisory
    /// proceeds. A stream failure abandons the partial accumulation entirely:
    /// no final chunk is sent and no sections are produced.
    pub async fn advise(
        &self,
        query: &str,
        tx: mpsc::UnboundedSender<StreamChunk>,
    ) -> Result<Advisory, AdvisoryError> {
        let results = self.gather_results(query).await;
        let context = self.context_builder.build(&results);
        let messages = compose_messages(&context, query);

        let (chunk_tx, mut chunk_rx) = mpsc::unbounded_channel();

        let stream = self.llm.stream_complete(&messages, chunk_tx);
        let drain = async {
            let mut full_text = String::new();
            while let Some(chunk) = chunk_rx.recv().await {
                if chunk.is_final {
                    break;
                }
                full_text.push_str(&chunk.text);
                let _ = tx.send(chunk);
            }
            full_text
        };

        let (outcome, full_text) = tokio::join!(stream, drain);
        outcome?;
        let _ = tx.send(StreamChunk::done());

        let sections = panel::partition(&full_text);
        Ok(Advisory {
            full_text,
            sections,
        })
    }

    async fn gather_results(&self, query: &str) -> Vec<SearchResult> {
        let Some(ref search) = self.search else {
            return Vec::new();
        };

        match search.search(query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("search failed, continuing without context: {e}");
                Vec::new()
            }
        }
    }
}
