//! Retry policy for provider calls
//!
//! Bounded attempts with exponential backoff. A provider `retry-after` hint
//! overrides the backoff for rate-limited responses.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use std::time::Duration;

/// Default number of attempts per bridge call
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the second attempt
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Longest provider `retry-after` hint honored as-is
pub const DEFAULT_MAX_HINT: Duration = Duration::from_secs(60);

/// Retry budget and backoff shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure
    pub base_delay: Duration,
    /// Upper bound on a provider `retry-after` hint
    pub max_hint: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_hint: DEFAULT_MAX_HINT,
        }
    }
}

/// What to do with a non-success HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Wait and try again
    Retry,
    /// Give up now
    Fail,
}

impl RetryPolicy {
    /// Create a policy; at least one attempt is always made
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_hint: DEFAULT_MAX_HINT,
        }
    }

    /// Override the cap on provider hints
    pub fn with_max_hint(mut self, max_hint: Duration) -> Self {
        self.max_hint = max_hint;
        self
    }

    /// Exponential backoff after the given failed attempt (1-based): base, 2x base, 4x base, ...
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Delay before the next attempt, preferring the provider's hint (capped at
    /// `max_hint`) when it sent one
    pub fn delay_for(&self, attempt: u32, hint: Option<Duration>) -> Duration {
        match hint {
            Some(hint) => hint.min(self.max_hint),
            None => self.backoff(attempt),
        }
    }

    /// Whether another attempt is allowed after `attempt` attempts
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// 503 is terminal; every other failure status is retried
    pub fn classify_status(status: StatusCode) -> StatusAction {
        if status == StatusCode::SERVICE_UNAVAILABLE {
            StatusAction::Fail
        } else {
            StatusAction::Retry
        }
    }
}

/// Parse a `retry-after` header given in whole or fractional seconds
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(Duration::from_secs_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_is_increasing() {
        let policy = RetryPolicy::new(5, Duration::from_millis(10));
        let delays: Vec<Duration> = (1..5).map(|a| policy.backoff(a)).collect();
        for pair in delays.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_hint_overrides_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_for(2, Some(Duration::from_secs(7))),
            Duration::from_secs(7)
        );
        assert_eq!(policy.delay_for(2, None), Duration::from_secs(2));
    }

    #[test]
    fn test_hint_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_for(1, Some(Duration::from_secs(3600))),
            DEFAULT_MAX_HINT
        );

        let tight = RetryPolicy::new(3, Duration::from_millis(10))
            .with_max_hint(Duration::from_millis(50));
        assert_eq!(
            tight.delay_for(1, Some(Duration::from_secs(30))),
            Duration::from_millis(50)
        );
        assert_eq!(
            tight.delay_for(1, Some(Duration::from_millis(20))),
            Duration::from_millis(20)
        );
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::default();
        assert!(policy.has_attempts_left(1));
        assert!(policy.has_attempts_left(2));
        assert!(!policy.has_attempts_left(3));

        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            RetryPolicy::classify_status(StatusCode::SERVICE_UNAVAILABLE),
            StatusAction::Fail
        );
        assert_eq!(
            RetryPolicy::classify_status(StatusCode::TOO_MANY_REQUESTS),
            StatusAction::Retry
        );
        assert_eq!(
            RetryPolicy::classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            StatusAction::Retry
        );
    }

    #[test]
    fn test_parse_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_retry_after(&headers), None);

        headers.insert(RETRY_AFTER, HeaderValue::from_static("3"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(3)));

        headers.insert(RETRY_AFTER, HeaderValue::from_static("0.5"));
        assert_eq!(
            parse_retry_after(&headers),
            Some(Duration::from_millis(500))
        );

        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }
}
