use crate::config::DEFAULT_MAX_SEARCH_RESULTS;
use crate::search::SearchResult;

/// Serializes search results into a context block for prompt inclusion.
///
/// Deterministic and pure: each result renders as a fixed three-line template,
/// records are separated by a blank line, input order is preserved, and at
/// most `max_results` records are taken. Empty input yields empty text.
pub struct ContextBuilder {
    max_results: usize,
}

impl ContextBuilder {
    /// Creates a context builder with the default result cap.
    pub fn new() -> Self {
        Self {
            max_results: DEFAULT_MAX_SEARCH_RESULTS,
        }
    }

    /// Sets the maximum number of results included in the block.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Builds the context block.
    pub fn build(&self, results: &[SearchResult]) -> String {
        results
            .iter()
            .take(self.max_results)
            .map(|r| format!("제목: {}\n내용: {}\nURL: {}", r.title, r.snippet, r.url))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
