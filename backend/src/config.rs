//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::bridge::config::{BridgeConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use crate::bridge::retry::{
    RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_HINT,
};
use secrecy::SecretString;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Model provider configuration
    pub bridge: BridgeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = BridgeConfig::default();

        let api_key = lookup("ANTHROPIC_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(SecretString::from);

        let retry = RetryPolicy::new(
            parsed(&lookup, "SOLVE_COACH_MAX_ATTEMPTS").unwrap_or(DEFAULT_MAX_ATTEMPTS),
            parsed(&lookup, "SOLVE_COACH_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BASE_DELAY),
        )
        .with_max_hint(
            parsed(&lookup, "SOLVE_COACH_MAX_RETRY_AFTER_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_MAX_HINT),
        );

        Self {
            server: ServerConfig {
                port: parsed(&lookup, "PORT").unwrap_or(8080),
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            },
            bridge: BridgeConfig {
                api_key,
                api_base_url: lookup("ANTHROPIC_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                api_version: defaults.api_version,
                model: lookup("SOLVE_COACH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: parsed(&lookup, "SOLVE_COACH_MAX_TOKENS")
                    .unwrap_or(defaults.max_tokens),
                temperature: parsed(&lookup, "SOLVE_COACH_TEMPERATURE")
                    .unwrap_or(defaults.temperature),
                timeout_secs: parsed(&lookup, "SOLVE_COACH_TIMEOUT_SECS")
                    .unwrap_or(defaults.timeout_secs),
                retry,
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
