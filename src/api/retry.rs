//! Retry policy with exponential backoff
//!
//! Only rate limiting and HTTP 500 responses are retried. Network failures
//! are surfaced immediately.

use std::time::Duration;

use crate::error::OrionxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    unit: Duration,
    max_delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// `unit` is the delay before the first retry; later delays double it
    pub fn new(max_retries: u32, unit: Duration) -> Self {
        Self {
            max_retries,
            unit,
            max_delay: None,
        }
    }

    /// Cap individual delays
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether this error can ever be fixed by sending the request again
    pub fn is_retryable(error: &OrionxError) -> bool {
        matches!(error, OrionxError::RateLimit(_)) || error.is_server_error()
    }

    /// `retries` is the number of retries already performed for this call
    pub fn should_retry(&self, error: &OrionxError, retries: u32) -> bool {
        retries < self.max_retries && Self::is_retryable(error)
    }

    /// Delay before retry number `attempt` (1-based): 1, 2, 4, ... units
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let delay = 2u32
            .checked_pow(exponent)
            .and_then(|factor| self.unit.checked_mul(factor))
            .unwrap_or(Duration::MAX);

        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }
}
