//! Bridge configuration
//!
//! Provider endpoint, model parameters, timeout and retry budget.

use crate::bridge::retry::RetryPolicy;
use secrecy::SecretString;

/// Default provider base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";

/// Provider API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Bridge configuration
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Provider API key; calls fail fast when absent
    pub api_key: Option<SecretString>,
    /// Base URL, without the `/v1/messages` path
    pub api_base_url: String,
    /// Value for the `anthropic-version` header
    pub api_version: String,
    /// Model identifier
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retry budget and backoff
    pub retry: RetryPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_version: ANTHROPIC_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

impl BridgeConfig {
    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        self.api_key = Some(SecretString::from(api_key));
        self
    }

    /// Point the bridge at a different base URL (used by tests and proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    /// Override the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Full URL of the messages endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base_url.trim_end_matches('/'))
    }

    /// Whether a non-blank API key is configured
    pub fn has_api_key(&self) -> bool {
        use secrecy::ExposeSecret;
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }
}
