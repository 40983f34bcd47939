//! SSE Client
//!
//! Maintains the single subscription to the server-pushed event stream.
//!
//! # Protocol
//!
//! The server publishes `text/event-stream` frames; each `data:` payload is
//! one JSON envelope for the codec. The client never writes to the stream.
//!
//! # Lifecycle
//!
//! The client emits [`TransportSignal`]s over the session channel:
//! `Opened` after each successful connect, `Frame` per event, and `Failed`
//! on connect or read errors. After a failure it sleeps per the reconnect
//! policy and tries again, until the cancellation token fires or the attempt
//! limit (if configured) is exhausted.

use std::time::Duration;

use eventsource_stream::{Event, EventStreamError, Eventsource};
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::reconnect::{ReconnectConfig, ReconnectPolicy};
use crate::application::ports::TransportSignal;
use crate::infrastructure::config::StreamSettings;

/// Default time without any event (including keep-alives) before the
/// connection is considered dead.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Boxed SSE event stream tied to one HTTP response.
type SseEventStream = BoxStream<'static, Result<Event, EventStreamError<reqwest::Error>>>;

// =============================================================================
// Error Type
// =============================================================================

/// Errors that can occur in the SSE client.
#[derive(Debug, thiserror::Error)]
pub enum SseTransportError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The event stream produced a framing or transport error.
    #[error("event stream error: {0}")]
    Stream(#[from] EventStreamError<reqwest::Error>),

    /// The server closed the stream.
    #[error("stream closed by server")]
    StreamEnded,

    /// No event arrived within the idle timeout.
    #[error("no event within idle timeout of {0:?}")]
    IdleTimeout(Duration),

    /// Maximum reconnection attempts exceeded.
    #[error("maximum reconnection attempts exceeded")]
    MaxReconnectAttemptsExceeded,
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the SSE client.
#[derive(Debug, Clone)]
pub struct SseTransportConfig {
    /// Stream endpoint URL.
    pub url: String,
    /// Reconnection configuration.
    pub reconnect: ReconnectConfig,
    /// Time without any event before the connection is restarted.
    pub idle_timeout: Duration,
}

impl SseTransportConfig {
    /// Create a configuration with default reconnect behavior.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectConfig::default(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Create a configuration for a URL from stream settings.
    #[must_use]
    pub fn from_settings(url: impl Into<String>, settings: &StreamSettings) -> Self {
        Self {
            url: url.into(),
            reconnect: ReconnectConfig::from_settings(settings),
            idle_timeout: settings.idle_timeout,
        }
    }
}

// =============================================================================
// SSE Client
// =============================================================================

/// SSE transport adapter feeding the session's signal channel.
#[derive(Debug)]
pub struct SseTransport {
    config: SseTransportConfig,
    client: reqwest::Client,
    signal_tx: mpsc::Sender<TransportSignal>,
    cancel: CancellationToken,
}

impl SseTransport {
    /// Create a new transport.
    #[must_use]
    pub fn new(
        config: SseTransportConfig,
        signal_tx: mpsc::Sender<TransportSignal>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            signal_tx,
            cancel,
        }
    }

    /// Run the connection loop until cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`SseTransportError::MaxReconnectAttemptsExceeded`] when a
    /// finite attempt limit is configured and exhausted. Cancellation and a
    /// dropped signal receiver both end the loop with `Ok`.
    pub async fn run(self) -> Result<(), SseTransportError> {
        let mut reconnect_policy = ReconnectPolicy::new(self.config.reconnect.clone());

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!("SSE transport cancelled");
                return Ok(());
            }

            match self.connect().await {
                Ok(events) => {
                    reconnect_policy.reset();
                    if !self.emit(TransportSignal::Opened).await {
                        return Ok(());
                    }

                    match self.pump(events).await {
                        Ok(()) => return Ok(()),
                        Err(error) => {
                            tracing::warn!(error = %error, "SSE stream error");
                            if !self.emit(TransportSignal::Failed(error.to_string())).await {
                                return Ok(());
                            }
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(error = %error, "SSE connect error");
                    if !self.emit(TransportSignal::Failed(error.to_string())).await {
                        return Ok(());
                    }
                }
            }

            let Some(delay) = reconnect_policy.next_delay() else {
                return Err(SseTransportError::MaxReconnectAttemptsExceeded);
            };

            tracing::info!(
                attempt = reconnect_policy.attempt_count(),
                delay_ms = delay.as_millis(),
                "Reconnecting to event stream"
            );

            tokio::select! {
                () = self.cancel.cancelled() => {
                    tracing::info!("SSE transport cancelled during reconnect delay");
                    return Ok(());
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Open the HTTP connection and hand back the event stream.
    async fn connect(&self) -> Result<SseEventStream, SseTransportError> {
        tracing::info!(url = %self.config.url, "Connecting to event stream");

        let response = self
            .client
            .get(&self.config.url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes_stream().eventsource().boxed())
    }

    /// Forward events until cancellation or a stream failure.
    ///
    /// `Ok` means the loop ended for a clean reason (cancelled, or the
    /// receiver went away); any `Err` asks the outer loop to reconnect.
    async fn pump(&self, mut events: SseEventStream) -> Result<(), SseTransportError> {
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => return Ok(()),
                next = tokio::time::timeout(self.config.idle_timeout, events.next()) => {
                    match next {
                        Err(_) => return Err(SseTransportError::IdleTimeout(self.config.idle_timeout)),
                        Ok(None) => return Err(SseTransportError::StreamEnded),
                        Ok(Some(Err(error))) => return Err(error.into()),
                        Ok(Some(Ok(event))) => {
                            tracing::trace!(event = %event.event, "Event received");
                            if !self.emit(TransportSignal::Frame(event.data)).await {
                                return Ok(());
                            }
                        }
                    }
                }
            }
        }
    }

    /// Send one signal; `false` means the receiver is gone and the
    /// transport should stop.
    async fn emit(&self, signal: TransportSignal) -> bool {
        if self.signal_tx.send(signal).await.is_err() {
            tracing::debug!("Signal receiver dropped, stopping transport");
            return false;
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
