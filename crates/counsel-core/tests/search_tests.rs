use counsel_core::{SearchClient, SearchConfig, SearchError};

#[test]
fn test_client_creation() {
    let _client = SearchClient::new("test-key");
}

#[test]
fn test_client_with_base_url() {
    let _client = SearchClient::new("test-key").with_base_url("http://localhost:8080/search.json");
}

#[test]
fn test_client_with_max_results() {
    let _client = SearchClient::new("test-key").with_max_results(5);
}

#[test]
fn test_from_config_with_key() {
    let config = SearchConfig {
        api_key: Some("test-key".to_string()),
        ..SearchConfig::default()
    };
    assert!(SearchClient::from_config(&config).is_ok());
}

#[test]
fn test_from_config_missing_key() {
    std::env::remove_var("COUNSEL_SEARCH_API_KEY");
    std::env::remove_var("SERPAPI_KEY");
    let config = SearchConfig::default();
    let result = SearchClient::from_config(&config);
    assert!(matches!(result, Err(SearchError::MissingApiKey)));
}
