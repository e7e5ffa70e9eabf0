//! Retry Policy
//!
//! Attempt budget and exponential backoff schedule for one retry sequence.

use std::time::Duration;

use crate::error::ConfigError;

/// Retries after the first attempt when no policy is given.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
/// Upper bound for any single backoff delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

// == Retry Policy ==
/// How often and how patiently to retry a failing operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt; 0 means a single attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Growth factor between consecutive delays, at least 1
    pub backoff_multiplier: f64,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a validated policy.
    pub fn new(
        max_retries: u32,
        initial_delay: Duration,
        backoff_multiplier: f64,
        max_delay: Duration,
    ) -> Result<Self, ConfigError> {
        let policy = Self {
            max_retries,
            initial_delay,
            backoff_multiplier,
            max_delay,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Single attempt, never waits.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidMultiplier(self.backoff_multiplier));
        }
        if self.max_delay < self.initial_delay {
            return Err(ConfigError::DelayBounds {
                initial_ms: self.initial_delay.as_millis(),
                max_ms: self.max_delay.as_millis(),
            });
        }
        Ok(())
    }

    /// Total number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay awaited after failed attempt `attempt` (1-based), before the next one.
    ///
    /// `min(initial_delay * backoff_multiplier^(attempt - 1), max_delay)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let scaled = self.initial_delay.as_nanos() as f64 * self.backoff_multiplier.powi(exponent);

        if scaled >= self.max_delay.as_nanos() as f64 {
            self.max_delay
        } else {
            Duration::from_nanos(scaled.round() as u64)
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
            backoff_multiplier: DEFAULT_BACKOFF_MULTIPLIER,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}
