//! Stream Session
//!
//! Owns the single logical subscription to the price stream. The session is
//! the only consumer of the transport's signal channel and the exclusive
//! owner of all mutable presentation state, so every frame decodes and
//! renders to completion before the next signal is dispatched and no locks
//! are needed.
//!
//! Shutdown is deterministic and idempotent: the shared cancellation token
//! stops the transport, the tracker moves to its terminal state, and closing
//! an already-closed session is a no-op.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{PresentationSurfaces, TransportSignal};
use crate::application::services::render::Renderer;
use crate::domain::connectivity::{
    ConnectivityEvent, ConnectivityState, ConnectivityTracker, StatusIndicator,
};
use crate::infrastructure::codec;

/// Consumes transport signals and drives the tracker and renderer.
#[derive(Debug)]
pub struct StreamSession<S: PresentationSurfaces> {
    signals: mpsc::Receiver<TransportSignal>,
    renderer: Renderer<S>,
    tracker: ConnectivityTracker,
    cancel: CancellationToken,
    last_indicator: Option<StatusIndicator>,
}

impl<S: PresentationSurfaces> StreamSession<S> {
    /// Create a session over the transport's signal channel.
    ///
    /// The cancellation token is shared with the transport adapter; closing
    /// the session cancels it, which closes the transport subscription.
    #[must_use]
    pub const fn new(
        signals: mpsc::Receiver<TransportSignal>,
        renderer: Renderer<S>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            signals,
            renderer,
            tracker: ConnectivityTracker::new(),
            cancel,
            last_indicator: None,
        }
    }

    /// Run the session until cancelled or the transport goes away.
    ///
    /// Returns the renderer so callers can inspect the final presentation
    /// state after shutdown.
    pub async fn run(mut self) -> Renderer<S> {
        loop {
            tokio::select! {
                () = self.cancel.cancelled() => break,
                signal = self.signals.recv() => {
                    match signal {
                        Some(signal) => self.handle_signal(signal),
                        None => break,
                    }
                }
            }
        }

        self.close();
        self.renderer
    }

    /// Close the session: cancel the transport and seal the tracker.
    ///
    /// Safe to call any number of times; every call after the first is a
    /// no-op.
    pub fn close(&mut self) {
        if self.tracker.state().is_closed() {
            return;
        }

        self.cancel.cancel();
        let _ = self.tracker.apply(ConnectivityEvent::Shutdown);
        tracing::info!("Stream session closed");
    }

    /// The current connectivity state.
    #[must_use]
    pub const fn state(&self) -> ConnectivityState {
        self.tracker.state()
    }

    fn handle_signal(&mut self, signal: TransportSignal) {
        match signal {
            TransportSignal::Opened => {
                tracing::info!("Stream connection opened");
                self.apply(ConnectivityEvent::TransportOpen);
            }
            TransportSignal::Failed(reason) => {
                tracing::warn!(reason = %reason, "Stream connection failed");
                self.apply(ConnectivityEvent::TransportError);
            }
            TransportSignal::Frame(raw) => match codec::decode(&raw) {
                Ok(envelope) => {
                    self.apply(ConnectivityEvent::from(&envelope));
                    self.renderer.render(&envelope);
                }
                Err(error) => {
                    // Discard the frame; every surface stays as it was.
                    tracing::warn!(error = %error, "Discarding undecodable frame");
                }
            },
        }
    }

    /// Feed the tracker and publish the indicator when it changed.
    ///
    /// Consecutive identical indicators are suppressed so the history log
    /// records transitions, not one annotation per snapshot.
    fn apply(&mut self, event: ConnectivityEvent) {
        let Some(indicator) = self.tracker.apply(event) else {
            return;
        };

        if self.last_indicator != Some(indicator) {
            self.renderer.render_status(&indicator);
            self.last_indicator = Some(indicator);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
