use std::future::Future;
use std::time::Duration;

use crate::core::OiError;

/// How a failed attempt should be handled by [`retry_with_backoff`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryClass {
    /// Retry after `base_delay * attempt` (timeouts, refused connections).
    Linear,
    /// Retry after `base_delay` (server-side statuses, other transport errors).
    Fixed,
    /// Give up immediately.
    Terminal,
}

/// Configuration for the per-page retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables retries. When disabled every page gets exactly one attempt.
    pub enabled: bool,
    /// The total number of attempts per page, the first one included.
    pub max_attempts: u32,
    /// Base delay of the backoff schedule.
    pub base_delay: Duration,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
    /// Whether to retry on non-4xx error statuses (5xx and friends).
    pub retry_on_server_error: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            retry_on_timeout: true,
            retry_on_connect: true,
            retry_on_server_error: true,
        }
    }
}

impl RetryConfig {
    /// Delay to wait after failed `attempt` (1-based), or `None` for terminal failures.
    #[must_use]
    pub fn delay_for(&self, class: RetryClass, attempt: u32) -> Option<Duration> {
        match class {
            RetryClass::Linear => Some(self.base_delay.saturating_mul(attempt)),
            RetryClass::Fixed => Some(self.base_delay),
            RetryClass::Terminal => None,
        }
    }

    /// Classifies a page-fetch error under this policy.
    ///
    /// Client errors (4xx) are never retried; neither are body-processing
    /// failures, since a second download would decode the same way.
    #[must_use]
    pub fn classify(&self, err: &OiError) -> RetryClass {
        match err {
            OiError::Http(e) if e.is_timeout() => {
                if self.retry_on_timeout {
                    RetryClass::Linear
                } else {
                    RetryClass::Terminal
                }
            }
            OiError::Http(e) if e.is_connect() => {
                if self.retry_on_connect {
                    RetryClass::Linear
                } else {
                    RetryClass::Terminal
                }
            }
            OiError::Http(_) => RetryClass::Fixed,
            OiError::Status { .. } if err.is_client_error() => RetryClass::Terminal,
            OiError::Status { .. } => {
                if self.retry_on_server_error {
                    RetryClass::Fixed
                } else {
                    RetryClass::Terminal
                }
            }
            OiError::Url(_) | OiError::Data(_) | OiError::Json(_) => RetryClass::Terminal,
        }
    }

    fn attempt_cap(&self) -> u32 {
        if self.enabled { self.max_attempts.max(1) } else { 1 }
    }
}

/// Runs `op` until it succeeds, `classify` reports a terminal error, or the
/// attempt cap is reached. `op` receives the 1-based attempt number.
///
/// The last error is returned once attempts run out; no delay follows the
/// final attempt.
pub async fn retry_with_backoff<T, E, Op, Fut, C>(
    cfg: &RetryConfig,
    mut op: Op,
    classify: C,
) -> Result<T, E>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    C: Fn(&E) -> RetryClass,
{
    let cap = cfg.attempt_cap();
    let mut attempt = 1;
    loop {
        let err = match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };
        if attempt >= cap {
            return Err(err);
        }
        let Some(delay) = cfg.delay_for(classify(&err), attempt) else {
            return Err(err);
        };
        tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "backing off before retry");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
