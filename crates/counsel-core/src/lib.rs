pub mod advisor;
pub mod config;
pub mod context;
pub mod export;
pub mod llm;
pub mod panel;
pub mod search;

pub use advisor::{Advisory, AdvisoryError, AdvisoryRunner};
pub use config::{Config, ConfigError, ExportConfig, LLMConfig, SearchConfig};
pub use context::ContextBuilder;
pub use export::{ExportError, ExportWriter, ExportedAdvisory};
pub use llm::{ChatMessage, CompletionModel, LLMError, OpenAIClient, StreamChunk};
pub use panel::{RoleSection, TEAM_MEMBERS};
pub use search::{SearchClient, SearchError, SearchResult};
