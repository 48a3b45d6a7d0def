//
//  bitbucket-provision
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retry policy for transient API failures.
//!
//! Bitbucket answers `429 Too Many Requests` when a client is rate limited
//! and 5xx when something is wrong server side. Both are worth waiting out.
//! Every other status, and every transport failure, is final.
//!
//! The wait between attempts goes through the [`RetryDelay`] trait so tests
//! can record delays instead of sleeping through them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

/// Default number of attempts for retryable responses.
pub const DEFAULT_NUM_RETRIES: u32 = 3;

/// Default delay between attempts, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 30;

/// Waits between two attempts of the same request.
#[async_trait]
pub trait RetryDelay: Send + Sync {
    /// Waits for `delay` before the next attempt.
    async fn wait(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl RetryDelay for TokioDelay {
    async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Returns `true` for statuses that signal a transient condition: 429 or any 5xx.
pub fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// How many times, and how far apart, retryable responses are retried.
///
/// `num_retries` is the attempt budget, compared after each retryable
/// response has been counted. A value of 3 therefore means at most three
/// requests in total, and 0 behaves like 1.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bitbucket_provision::api::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(30));
/// assert!(!policy.exhausted(1));
/// assert!(!policy.exhausted(2));
/// assert!(policy.exhausted(3));
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    num_retries: u32,
    retry_delay: Duration,
    delay: Arc<dyn RetryDelay>,
}

impl RetryPolicy {
    /// Creates a policy that sleeps on the tokio timer.
    pub fn new(num_retries: u32, retry_delay: Duration) -> Self {
        Self::with_delay(num_retries, retry_delay, Arc::new(TokioDelay))
    }

    /// Creates a policy with a custom wait strategy.
    pub fn with_delay(num_retries: u32, retry_delay: Duration, delay: Arc<dyn RetryDelay>) -> Self {
        Self {
            num_retries,
            retry_delay,
            delay,
        }
    }

    /// The configured attempt budget.
    pub fn num_retries(&self) -> u32 {
        self.num_retries
    }

    /// The configured delay between attempts.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns `true` once `failed_attempts` retryable responses use up the budget.
    pub fn exhausted(&self, failed_attempts: u32) -> bool {
        failed_attempts >= self.num_retries
    }

    /// Waits the configured delay.
    pub async fn wait(&self) {
        self.delay.wait(self.retry_delay).await;
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_NUM_RETRIES,
            Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        )
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("num_retries", &self.num_retries)
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));

        for code in [200, 201, 204, 301, 400, 401, 403, 404, 409, 422] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(!is_retryable(status), "{status} should not be retried");
        }
    }

    #[test]
    fn test_zero_budget_is_exhausted_after_first_failure() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert!(policy.exhausted(1));
    }

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.num_retries(), 3);
        assert_eq!(policy.retry_delay(), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_tokio_delay_sleeps_for_duration() {
        let start = std::time::Instant::now();
        TokioDelay.wait(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
