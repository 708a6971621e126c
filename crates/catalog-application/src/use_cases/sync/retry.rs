//! Retry policy for transient embedding failures

use rand::Rng;
use std::time::Duration;

/// Exponential backoff with full jitter and a bounded number of retries
///
/// The ceiling for retry `n` (1-based) is `min(max_delay, base_delay * 2^(n-1))`;
/// the actual delay is drawn uniformly from `[0, ceiling]` so that many
/// products failing together do not retry in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first failed attempt
    pub max_retries: u32,
    /// Ceiling of the first retry delay
    pub base_delay: Duration,
    /// Largest ceiling any retry can reach
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Policy with the given bounds
    pub fn new(max_retries: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay,
        }
    }

    /// Whether another attempt is allowed after `failures` failed attempts
    pub fn allows_retry(&self, failures: u32) -> bool {
        failures <= self.max_retries
    }

    /// Upper bound of the delay before retry number `retry` (1-based)
    pub fn ceiling(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        let factor = 1u32 << exponent;
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Jittered delay before retry number `retry` (1-based)
    pub fn delay(&self, retry: u32) -> Duration {
        let ceiling = u64::try_from(self.ceiling(retry).as_millis()).unwrap_or(u64::MAX);
        if ceiling == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..=ceiling))
    }
}
