//! Exponential backoff with full jitter, keyed by error kind.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{error, warn};

use crate::error::{GatewayError, Result};

/// Backoff parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay ceiling after the first failed attempt
    pub base_delay: Duration,
    /// Growth factor between consecutive delay ceilings
    pub multiplier: f64,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Draw each delay uniformly from [0, ceiling] instead of sleeping the ceiling
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay: Duration::from_millis(2000),
            multiplier: 2.0,
            max_delay: Duration::from_millis(20000),
            jitter: true,
        }
    }
}

/// Retries retryable upstream failures with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self::new(RetryConfig {
            max_attempts: 1,
            ..RetryConfig::default()
        })
    }

    /// Deterministic delay ceiling after the failure of zero-indexed `attempt`:
    /// `min(max_delay, base_delay * multiplier^attempt)`.
    pub fn delay_ceiling(&self, attempt: u32) -> Duration {
        let cap = self.config.max_delay;
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let raw = self.config.base_delay.as_secs_f64() * self.config.multiplier.powi(exponent);
        // Overflowing or NaN products fall back to the cap
        Duration::try_from_secs_f64(raw).map_or(cap, |delay| delay.min(cap))
    }

    /// The delay actually slept after the failure of `attempt`.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let ceiling = self.delay_ceiling(attempt);
        if !self.config.jitter || ceiling.is_zero() {
            return ceiling;
        }
        let factor: f64 = rand::thread_rng().gen_range(0.0..=1.0);
        ceiling.mul_f64(factor).min(ceiling)
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent.
    ///
    /// The last error is returned unchanged. Dropping the returned future
    /// during a backoff sleep abandons the remaining attempts.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            let error: GatewayError = match call().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            if attempt + 1 >= max_attempts {
                error!(
                    "{} failed after {} attempts: {}",
                    operation, max_attempts, error
                );
                return Err(error);
            }

            let delay = self.backoff_delay(attempt);
            warn!(
                "{} attempt {}/{} failed ({}), retrying in {:?}",
                operation,
                attempt + 1,
                max_attempts,
                error,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
