//! Client Configuration Settings
//!
//! Configuration types for the ticker client, loaded from environment
//! variables. Every knob has a default; only the stream URL is required.

use std::time::Duration;

/// Stream connection settings.
#[derive(Debug, Clone)]
pub struct StreamSettings {
    /// Initial reconnection delay.
    pub reconnect_delay_initial: Duration,
    /// Maximum reconnection delay.
    pub reconnect_delay_max: Duration,
    /// Reconnection delay multiplier for exponential backoff.
    pub reconnect_delay_multiplier: f64,
    /// Maximum reconnection attempts before giving up (0 = unlimited).
    pub max_reconnect_attempts: u32,
    /// Time without any event before the connection is restarted.
    pub idle_timeout: Duration,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            reconnect_delay_initial: Duration::from_secs(1),
            reconnect_delay_max: Duration::from_secs(30),
            reconnect_delay_multiplier: 2.0,
            max_reconnect_attempts: 0, // Unlimited
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone)]
pub struct PresentationSettings {
    /// History entries retained before tail eviction (0 = unbounded).
    pub history_retention: usize,
    /// Decimal places for rendered prices.
    pub price_decimals: usize,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            history_retention: 256,
            price_decimals: 2,
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct TickerConfig {
    /// SSE endpoint delivering the price stream.
    pub stream_url: String,
    /// Stream connection settings.
    pub stream: StreamSettings,
    /// Presentation settings.
    pub presentation: PresentationSettings,
    /// Capacity of the transport signal channel.
    pub signal_capacity: usize,
}

impl TickerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TICKER_STREAM_URL` is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let stream_url = std::env::var("TICKER_STREAM_URL")
            .map_err(|_| ConfigError::MissingEnvVar("TICKER_STREAM_URL".to_string()))?;

        if stream_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("TICKER_STREAM_URL".to_string()));
        }

        let stream = StreamSettings {
            reconnect_delay_initial: parse_env_duration_millis(
                "TICKER_RECONNECT_DELAY_INITIAL_MS",
                StreamSettings::default().reconnect_delay_initial,
            ),
            reconnect_delay_max: parse_env_duration_secs(
                "TICKER_RECONNECT_DELAY_MAX_SECS",
                StreamSettings::default().reconnect_delay_max,
            ),
            reconnect_delay_multiplier: parse_env_f64(
                "TICKER_RECONNECT_DELAY_MULTIPLIER",
                StreamSettings::default().reconnect_delay_multiplier,
            ),
            max_reconnect_attempts: parse_env_u32(
                "TICKER_MAX_RECONNECT_ATTEMPTS",
                StreamSettings::default().max_reconnect_attempts,
            ),
            idle_timeout: parse_env_duration_secs(
                "TICKER_IDLE_TIMEOUT_SECS",
                StreamSettings::default().idle_timeout,
            ),
        };

        let presentation = PresentationSettings {
            history_retention: parse_env_usize(
                "TICKER_HISTORY_RETENTION",
                PresentationSettings::default().history_retention,
            ),
            price_decimals: parse_env_usize(
                "TICKER_PRICE_DECIMALS",
                PresentationSettings::default().price_decimals,
            ),
        };

        let signal_capacity = parse_env_usize("TICKER_SIGNAL_CAPACITY", 256).max(1);

        Ok(Self {
            stream_url,
            stream,
            presentation,
            signal_capacity,
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
}

fn parse_env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_env_duration_secs(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

fn parse_env_duration_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
