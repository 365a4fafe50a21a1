//! Retry policy for transient transport failures.

use std::time::Duration;

use rand::Rng;

/// Configuration for retry behavior.
///
/// `max_attempts` counts every attempt including the first one, so the
/// default of 3 means one initial request plus up to two retries.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts per call (at least one is always made).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::Constant,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the maximum delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Linear increase in delay (delay * attempt).
    Linear,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with random jitter to avoid thundering herd.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given retry number (0-indexed).
    ///
    /// The result always lies within `[0, max_delay]`, whatever the factor
    /// or retry number.
    pub fn delay(&self, retry: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        match self {
            BackoffStrategy::Constant => initial_delay.min(max_delay),
            BackoffStrategy::Linear => initial_delay
                .checked_mul(retry.saturating_add(1))
                .map_or(max_delay, |delay| delay.min(max_delay)),
            BackoffStrategy::Exponential { factor } => {
                clamp_secs(initial_delay.as_secs_f64() * scale(*factor, retry), max_delay)
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base =
                    clamp_secs(initial_delay.as_secs_f64() * scale(*factor, retry), max_delay);

                // Jitter: random value between 0 and base
                let jitter = base.mul_f64(rand::rng().random::<f64>());

                base.saturating_add(jitter).min(max_delay)
            }
        }
    }
}

fn scale(factor: f64, retry: u32) -> f64 {
    factor.powi(i32::try_from(retry).unwrap_or(i32::MAX))
}

/// Float seconds to a `Duration` capped at `max_delay`. NaN and negative values are zero.
fn clamp_secs(secs: f64, max_delay: Duration) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs.min(max_delay.as_secs_f64())).unwrap_or(max_delay)
}

/// Per-call retry cursor built from an immutable [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 1 }
    }

    /// Returns the current attempt number (1-indexed).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true if another attempt is allowed after a failure.
    pub fn should_retry(&self) -> bool {
        self.attempt < self.config.max_attempts
    }

    /// Record a failed attempt and return the delay before the next one.
    /// Returns None once the attempt budget is spent.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let delay = self.config.backoff.delay(
            self.attempt - 1,
            self.config.delay,
            self.config.max_delay,
        );

        self.attempt += 1;
        Some(delay)
    }
}
