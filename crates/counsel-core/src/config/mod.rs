//! Configuration management for Counsel.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `counsel.toml` file
//! 3. User config `~/.config/counsel/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! API keys are never validated at load time. The first provider call that
//! needs a missing key fails with an authentication error.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion provider configuration.
    pub llm: LLMConfig,

    /// Search provider configuration.
    pub search: SearchConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LLMConfig::default(),
            search: SearchConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./counsel.toml` (project local)
    /// 2. `~/.config/counsel/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        // Try project-local config first
        if Path::new("counsel.toml").exists() {
            return Self::from_file("counsel.toml");
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("counsel").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Use defaults
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // LLM overrides
        if let Ok(model) = std::env::var("COUNSEL_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Ok(url) = std::env::var("COUNSEL_LLM_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("COUNSEL_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(tokens) = std::env::var("COUNSEL_LLM_MAX_TOKENS") {
            if let Ok(n) = tokens.parse() {
                self.llm.max_tokens = n;
            }
        }

        // Search overrides
        if let Ok(key) = std::env::var("COUNSEL_SEARCH_API_KEY") {
            self.search.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("COUNSEL_SEARCH_BASE_URL") {
            self.search.base_url = url;
        }

        // Export overrides
        if let Ok(file) = std::env::var("COUNSEL_EXPORT_FILE") {
            self.export.file = file;
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Completion provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Model name.
    pub model: Option<String>,

    /// Base URL for the OpenAI-compatible API.
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens for the response.
    pub max_tokens: u32,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: None,    // Use built-in default
            base_url: None, // Use built-in default
            api_key: None,  // Load from env
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl LLMConfig {
    /// Get the model name, falling back to the default.
    pub fn model_or_default(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string())
    }

    /// Get the base URL, falling back to the default.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_LLM_URL.to_string())
    }

    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("COUNSEL_LLM_API_KEY").ok())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }
}

/// Search provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search engine requested from the provider.
    pub engine: String,

    /// Base URL for the SerpAPI-compatible API.
    pub base_url: String,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum number of results kept per query.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: DEFAULT_SEARCH_ENGINE.to_string(),
            base_url: DEFAULT_SEARCH_URL.to_string(),
            api_key: None, // Load from env
            max_results: DEFAULT_MAX_SEARCH_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("COUNSEL_SEARCH_API_KEY").ok())
            .or_else(|| std::env::var("SERPAPI_KEY").ok())
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Export file name (overwritten on each export).
    pub file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.search.engine, DEFAULT_SEARCH_ENGINE);
        assert_eq!(config.search.max_results, DEFAULT_MAX_SEARCH_RESULTS);
        assert_eq!(config.export.file, DEFAULT_EXPORT_FILE);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[llm]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[export]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"
max_tokens = 2048

[search]
engine = "google"
max_results = 5

[export]
file = "advice.txt"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.model, Some("gpt-4o-mini".to_string()));
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.export.file, "advice.txt");
    }

    #[test]
    fn test_model_or_default() {
        let mut config = LLMConfig::default();
        assert_eq!(config.model_or_default(), DEFAULT_LLM_MODEL);

        config.model = Some("custom-model".to_string());
        assert_eq!(config.model_or_default(), "custom-model");
    }

    #[test]
    fn test_api_key_from_config_wins() {
        let config = SearchConfig {
            api_key: Some("config-key".to_string()),
            ..SearchConfig::default()
        };
        assert_eq!(config.api_key_or_env(), Some("config-key".to_string()));
    }
}
