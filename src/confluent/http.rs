//! Retryable HTTP transport for Confluent Cloud REST calls
//!
//! Wraps a [`reqwest::Client`] with exponential-backoff retries for transient
//! failures. Terminal responses are handed back untouched; interpreting the
//! status code is left to the caller.

use anyhow::{Context, Result};
use reqwest::{Client, Request, Response, StatusCode};
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Default lower bound for the wait between two attempts
pub const DEFAULT_MIN_WAIT: Duration = Duration::from_secs(1);

/// Default upper bound for the wait between two attempts
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt (1 + 2 + 4 + 8 = ~15s worst case)
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
pub(crate) fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Exponential backoff parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub min_wait: Duration,
    pub max_wait: Duration,
    /// Retries after the first attempt; a request is sent at most `max_retries + 1` times
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_wait: DEFAULT_MIN_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    /// Override the retry ceiling, keeping the default waits
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the wait bounds
    pub fn with_waits(mut self, min_wait: Duration, max_wait: Duration) -> Self {
        self.min_wait = min_wait;
        self.max_wait = max_wait;
        self
    }

    /// Wait before retry number `attempt` (0-based): `min_wait * 2^attempt`, capped at `max_wait`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.min_wait
            .checked_mul(factor)
            .map_or(self.max_wait, |wait| wait.min(self.max_wait))
    }

    /// Total time spent sleeping when every retry is used up
    pub fn worst_case_delay(&self) -> Duration {
        (0..self.max_retries).map(|attempt| self.backoff(attempt)).sum()
    }
}

/// 429 and every 5xx except 501 are worth another attempt
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED)
}

/// HTTP client that retries transient failures with exponential backoff
#[derive(Clone)]
pub struct RetryingClient {
    client: Client,
    policy: RetryPolicy,
}

impl RetryingClient {
    /// Create a new retrying client
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ccimport/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, policy })
    }

    /// Underlying client, used to build requests
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Send a request, retrying network failures, 429 and 5xx (except 501).
    ///
    /// Once retries are exhausted the last response or error is returned as-is.
    /// Requests whose body cannot be cloned are sent exactly once.
    pub async fn execute(&self, request: Request) -> reqwest::Result<Response> {
        let mut pending = request;
        let mut attempt = 0;

        loop {
            let retry_copy = if attempt < self.policy.max_retries {
                pending.try_clone()
            } else {
                None
            };
            let method = pending.method().clone();
            let url = pending.url().clone();

            let result = self.client.execute(pending).await;

            let Some(next) = retry_copy else {
                return result;
            };

            let reason = match &result {
                Ok(response) if is_retryable_status(response.status()) => {
                    Some(response.status().to_string())
                }
                Err(err) if !err.is_builder() => Some(err.to_string()),
                _ => None,
            };
            let Some(reason) = reason else {
                return result;
            };
            drop(result);

            let wait = self.policy.backoff(attempt);
            attempt += 1;
            tracing::debug!(
                "{} {} failed ({}), retrying in {:?} (retry {}/{})",
                method,
                url,
                reason,
                wait,
                attempt,
                self.policy.max_retries
            );

            tokio::time::sleep(wait).await;
            pending = next;
        }
    }
}
