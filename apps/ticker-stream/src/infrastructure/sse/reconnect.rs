//! Reconnection Policy
//!
//! Exponential backoff with jitter for the stream transport. The policy only
//! computes delays; the transport adapter decides when to sleep and when to
//! give up.

use std::time::Duration;

use rand::Rng;

use crate::infrastructure::config::StreamSettings;

/// Exponent cap so the backoff series stops growing once it is far past any
/// sensible max delay.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Configuration for reconnection behavior.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Ceiling for the backoff series.
    pub max_delay: Duration,
    /// Growth factor between attempts (2.0 doubles the delay).
    pub multiplier: f64,
    /// Jitter as a fraction of the delay (0.1 = ±10%).
    pub jitter_factor: f64,
    /// Attempts before giving up (0 = unlimited).
    pub max_attempts: u32,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
            jitter_factor: 0.1,
            max_attempts: 0,
        }
    }
}

impl ReconnectConfig {
    /// Create configuration from stream settings.
    #[must_use]
    pub const fn from_settings(settings: &StreamSettings) -> Self {
        Self {
            initial_delay: settings.reconnect_delay_initial,
            max_delay: settings.reconnect_delay_max,
            multiplier: settings.reconnect_delay_multiplier,
            jitter_factor: 0.1,
            max_attempts: settings.max_reconnect_attempts,
        }
    }
}

/// Computes per-attempt reconnection delays.
///
/// The delay for attempt `n` (zero-based) is
/// `initial_delay * multiplier^n`, capped at `max_delay`, with jitter
/// applied last. [`ReconnectPolicy::reset`] rewinds the series after a
/// successful connection.
#[derive(Debug)]
pub struct ReconnectPolicy {
    config: ReconnectConfig,
    attempt: u32,
}

impl ReconnectPolicy {
    /// Create a policy from its configuration.
    #[must_use]
    pub const fn new(config: ReconnectConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// The delay to wait before the next attempt, or `None` once the attempt
    /// limit is exhausted.
    #[must_use]
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.config.max_attempts > 0 && self.attempt >= self.config.max_attempts {
            return None;
        }

        let exponent = self.attempt.min(MAX_BACKOFF_EXPONENT);
        self.attempt += 1;

        #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
        let base_ms = self.config.initial_delay.as_millis() as f64
            * self.config.multiplier.powi(exponent as i32);
        #[allow(clippy::cast_precision_loss)]
        let capped_ms = base_ms.min(self.config.max_delay.as_millis() as f64);

        Some(self.apply_jitter(capped_ms))
    }

    /// Rewind the series after a successful connection.
    pub const fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Number of delays handed out since the last reset.
    #[must_use]
    pub const fn attempt_count(&self) -> u32 {
        self.attempt
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn apply_jitter(&self, base_ms: f64) -> Duration {
        if self.config.jitter_factor <= 0.0 {
            return Duration::from_millis(base_ms as u64);
        }

        let spread = base_ms * self.config.jitter_factor;
        let mut rng = rand::rng();
        let jitter: f64 = rng.random_range(-spread..=spread);
        Duration::from_millis((base_ms + jitter).max(1.0) as u64)
    }
}

// =============================================================================
// Tests
// =============================================================================
