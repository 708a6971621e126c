//! Common helpers for embedding providers

/// Constructor helpers shared by the HTTP providers
pub mod constructor {
    use std::time::Duration;

    use reqwest::Client;

    use crate::constants::EMBEDDING_HTTP_TIMEOUT_SECS;

    /// Trim whitespace around an API key
    pub fn validate_api_key(api_key: &str) -> String {
        api_key.trim().to_string()
    }

    /// Configured URL without surrounding whitespace or trailing slash,
    /// falling back to `default_url`
    pub fn effective_url(provided_url: Option<&str>, default_url: &str) -> String {
        provided_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(default_url)
            .trim_end_matches('/')
            .to_string()
    }

    /// Transport timeout, falling back to the provider default
    pub fn effective_timeout(timeout: Option<Duration>) -> Duration {
        timeout.unwrap_or(Duration::from_secs(EMBEDDING_HTTP_TIMEOUT_SECS))
    }

    /// Build the HTTP client used by a provider factory
    pub fn http_client(timeout: Duration) -> Result<Client, String> {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))
    }

}
