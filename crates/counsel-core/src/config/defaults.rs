//! Default values for Counsel configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default completion API URL (OpenAI-compatible).
pub const DEFAULT_LLM_URL: &str = "https://api.openai.com/v1";

/// Default completion model.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o";

/// Default max tokens for completion responses.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

// ============================================================================
// Search Defaults
// ============================================================================

/// Default search API URL (SerpAPI-compatible).
pub const DEFAULT_SEARCH_URL: &str = "https://serpapi.com/search.json";

/// Default search engine requested from the provider.
pub const DEFAULT_SEARCH_ENGINE: &str = "google";

/// Maximum number of search results kept for prompt context.
pub const DEFAULT_MAX_SEARCH_RESULTS: usize = 3;

// ============================================================================
// Export Defaults
// ============================================================================

/// Default export file name, overwritten on each export.
pub const DEFAULT_EXPORT_FILE: &str = "legal_advice.txt";
