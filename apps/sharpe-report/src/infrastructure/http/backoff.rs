//! Exponential backoff with jitter for HTTP retries.

use std::time::Duration;

use rand::Rng;

use super::client::RetrySettings;

/// Exponential backoff calculator.
#[derive(Debug)]
pub struct ExponentialBackoff {
    attempt: u32,
    max_attempts: u32,
    current_backoff: Duration,
    max_backoff: Duration,
    multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoff {
    /// Start a fresh backoff sequence.
    #[must_use]
    pub const fn new(settings: &RetrySettings) -> Self {
        Self {
            attempt: 0,
            max_attempts: settings.max_attempts,
            current_backoff: settings.initial_backoff,
            max_backoff: settings.max_backoff,
            multiplier: settings.multiplier,
            jitter_factor: settings.jitter_factor,
        }
    }

    /// Attempts consumed so far.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a failed attempt and return the delay before the next one.
    ///
    /// Returns `None` once `max_attempts` have been made.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let backoff = self.current_backoff;
        self.current_backoff = Duration::from_secs_f64(
            (self.current_backoff.as_secs_f64() * self.multiplier)
                .min(self.max_backoff.as_secs_f64()),
        );

        Some(self.apply_jitter(backoff))
    }

    fn apply_jitter(&self, duration: Duration) -> Duration {
        if self.jitter_factor <= 0.0 {
            return duration;
        }

        #[allow(clippy::cast_precision_loss)]
        let base_millis = duration.as_millis() as f64;
        let jitter_range = base_millis * self.jitter_factor;
        let mut rng = rand::rng();
        let jitter: f64 = rng.random_range(-jitter_range..=jitter_range);
        let adjusted_millis = (base_millis + jitter).max(1.0);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let adjusted_u64 = adjusted_millis as u64;
        Duration::from_millis(adjusted_u64)
    }
}
