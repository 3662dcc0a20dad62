//! Conversation bridge
//!
//! Direct HTTP client for the Anthropic Messages API. Formats a conversation
//! into a request, sends it with bounded retry, and decodes the completion
//! into display text plus a rubric snapshot.

use crate::bridge::anthropic_types::{error_message, MessagesRequest, MessagesResponse};
use crate::bridge::config::BridgeConfig;
use crate::bridge::decode::{decode_closing, decode_turn};
use crate::bridge::error::BridgeError;
use crate::bridge::request::build_request;
use crate::bridge::retry::{parse_retry_after, RetryPolicy, StatusAction};
use crate::bridge::{BridgeReply, CompletionClient};
use crate::session::models::Turn;
use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Outcome of a single HTTP attempt
enum Attempt {
    /// Completion text from a 2xx response
    Done(String),
    /// Failure worth another attempt, with an optional provider delay hint
    Retry(BridgeError, Option<Duration>),
    /// Failure that ends the call
    Fail(BridgeError),
}

/// Stateless bridge to the completion endpoint
///
/// Holds only configuration and a pooled HTTP client, so one instance can be
/// shared across tasks.
#[derive(Debug, Clone)]
pub struct ConversationBridge {
    client: reqwest::Client,
    config: BridgeConfig,
}

impl ConversationBridge {
    /// Build a bridge with its own HTTP client using the configured timeout
    ///
    /// # Errors
    /// * Returns `BridgeError::Configuration` if the HTTP client cannot be built.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| {
                BridgeError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Build a bridge around an existing HTTP client (connection pooling)
    pub fn with_client(client: reqwest::Client, config: BridgeConfig) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> Result<&SecretString, BridgeError> {
        match &self.config.api_key {
            Some(key) if self.config.has_api_key() => Ok(key),
            _ => Err(BridgeError::Configuration(
                "ANTHROPIC_API_KEY is not set; the model provider cannot be called".to_string(),
            )),
        }
    }

    /// Send a conversation to the model and decode the reply.
    ///
    /// With `finalize` set the model is asked for a closing debrief and the
    /// returned rubric has every stage complete.
    ///
    /// # Errors
    /// * `Configuration` if no API key is set (checked before any network call)
    /// * `EmptyHistory` if `history` has no usable turns
    /// * `RateLimited`, `Transport`, `Status` once the retry budget is spent
    /// * `ServiceUnavailable` on HTTP 503, without retrying
    /// * `Decode` if the completion does not match the expected shape
    pub async fn send_turn(
        &self,
        history: &[Turn],
        finalize: bool,
    ) -> Result<BridgeReply, BridgeError> {
        let api_key = self.api_key()?;

        let request = build_request(&self.config, history, finalize);
        if request.messages.is_empty() {
            return Err(BridgeError::EmptyHistory);
        }

        let text = self.send_with_retry(api_key, &request, finalize).await?;

        let reply = if finalize {
            decode_closing(&text)
        } else {
            decode_turn(&text)
        };

        match &reply {
            Ok(reply) => tracing::debug!(
                finalize = finalize,
                reply_len = reply.display_text.len(),
                completed_stages = reply.rubric_state.completed_count(),
                "Decoded model reply"
            ),
            Err(e) => tracing::error!(
                finalize = finalize,
                error = %e,
                completion_len = text.len(),
                "Model reply did not match the expected shape"
            ),
        }

        reply
    }

    async fn send_with_retry(
        &self,
        api_key: &SecretString,
        request: &MessagesRequest,
        finalize: bool,
    ) -> Result<String, BridgeError> {
        let policy = self.config.retry;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            tracing::debug!(
                attempt = attempt,
                max_attempts = policy.max_attempts,
                model = %request.model,
                message_count = request.messages.len(),
                finalize = finalize,
                "Calling model provider"
            );

            let (error, hint) = match self.attempt(api_key, request).await {
                Attempt::Done(text) => return Ok(text),
                Attempt::Fail(error) => {
                    tracing::error!(
                        attempt = attempt,
                        error = %error,
                        "Model provider call failed"
                    );
                    return Err(error);
                }
                Attempt::Retry(error, hint) => (error, hint),
            };

            if !policy.has_attempts_left(attempt) {
                tracing::error!(
                    attempts = attempt,
                    error = %error,
                    "Model provider call failed after exhausting retries"
                );
                return Err(match error {
                    BridgeError::RateLimited { message, .. } => BridgeError::RateLimited {
                        attempts: attempt,
                        message,
                    },
                    other => other,
                });
            }

            let delay = policy.delay_for(attempt, hint);
            tracing::warn!(
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                from_hint = hint.is_some(),
                error = %error,
                "Retrying model provider call"
            );
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(&self, api_key: &SecretString, request: &MessagesRequest) -> Attempt {
        let response = match self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.config.api_version)
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Retry(BridgeError::from(e), None),
        };

        let status = response.status();
        if !status.is_success() {
            let hint = parse_retry_after(response.headers());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            let message = error_message(&body);

            tracing::warn!(
                status_code = status.as_u16(),
                error_body = %message,
                "Model provider returned error status"
            );

            if RetryPolicy::classify_status(status) == StatusAction::Fail {
                return Attempt::Fail(BridgeError::ServiceUnavailable(message));
            }
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Attempt::Retry(
                    BridgeError::RateLimited {
                        attempts: 0,
                        message,
                    },
                    hint,
                );
            }
            return Attempt::Retry(
                BridgeError::Status {
                    status: status.as_u16(),
                    message,
                },
                None,
            );
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Attempt::Retry(BridgeError::from(e), None),
        };

        match serde_json::from_str::<MessagesResponse>(&body) {
            Ok(parsed) => {
                let text = parsed.text();
                if text.trim().is_empty() {
                    Attempt::Fail(BridgeError::Decode(
                        "model response contains no text".to_string(),
                    ))
                } else {
                    Attempt::Done(text)
                }
            }
            Err(e) => Attempt::Fail(BridgeError::Decode(format!(
                "unexpected response body: {} - {}",
                e, body
            ))),
        }
    }
}

#[async_trait]
impl CompletionClient for ConversationBridge {
    async fn send_turn(
        &self,
        history: &[Turn],
        finalize: bool,
    ) -> Result<BridgeReply, BridgeError> {
        ConversationBridge::send_turn(self, history, finalize).await
    }
}
