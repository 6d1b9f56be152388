//! Retry policy: attempt budget and backoff delays for one slot.

use std::time::Duration;

use crate::config::MAX_RETRIES;

/// Retry policy for filling a deck slot.
///
/// The default budget is three attempts with no wait in between.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per slot, including the first.
    pub max_attempts: u32,

    /// Delay before the second attempt.
    pub base_delay: Duration,

    /// Backoff multiplier for exponential backoff.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            base_delay: Duration::ZERO,
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay after `attempts` failed attempts (1-indexed).
    ///
    /// delay = base_delay * multiplier^(attempts - 1)
    ///
    /// With base_delay=100ms, multiplier=2.0: 100ms, 200ms, 400ms, ...
    ///
    /// Saturates at `Duration::MAX` instead of overflowing.
    pub fn next_delay(&self, attempts: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempts.saturating_sub(1)).unwrap_or(i32::MAX);
        let delay_secs = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(delay_secs).unwrap_or(Duration::MAX)
    }

    pub fn has_attempts_left(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }
}
