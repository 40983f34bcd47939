//! Connectivity State Machine
//!
//! Tracks the lifecycle of the single upstream subscription as a small state
//! machine. The tracker only reflects observed transport and envelope
//! signals; it never initiates reconnection itself (that is the transport
//! adapter's job) and decode failures never feed into it.
//!
//! The transition function is total: any (state, event) pair not covered by
//! an explicit rule leaves the state unchanged, and `Closed` absorbs
//! everything.

use serde::Serialize;

use crate::domain::snapshot::Envelope;

// =============================================================================
// States and Events
// =============================================================================

/// Connection lifecycle state. Exactly one value is active at a time.
///
/// `Closed` is terminal: it is reached only through an explicit shutdown,
/// never by the transport itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityState {
    /// Initial state; the transport has not reported an open stream yet.
    Connecting,
    /// The stream is open and delivering data.
    Connected,
    /// The stream is open but upstream has no data available yet.
    Waiting,
    /// The transport or upstream reported an error; the transport is
    /// expected to reconnect autonomously.
    Errored,
    /// The session was shut down. No further transitions are accepted.
    Closed,
}

impl ConnectivityState {
    /// Check whether this is the terminal state.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Apply one lifecycle event, returning the next state and the status
    /// indicator to publish, if the transition calls for one.
    #[must_use]
    pub const fn apply(self, event: ConnectivityEvent) -> (Self, Option<StatusIndicator>) {
        if self.is_closed() {
            return (Self::Closed, None);
        }

        match event {
            ConnectivityEvent::Shutdown => (Self::Closed, None),
            ConnectivityEvent::TransportOpen => {
                (Self::Connected, Some(StatusIndicator::CONNECTED))
            }
            ConnectivityEvent::TransportError => {
                (Self::Errored, Some(StatusIndicator::RECONNECTING))
            }
            ConnectivityEvent::EnvelopeError => {
                (Self::Errored, Some(StatusIndicator::UPSTREAM_ERROR))
            }
            ConnectivityEvent::EnvelopeSuccess => match self {
                Self::Connected | Self::Waiting => {
                    (Self::Connected, Some(StatusIndicator::CONNECTED))
                }
                other => (other, None),
            },
            ConnectivityEvent::EnvelopeWaiting => match self {
                Self::Connected => (Self::Waiting, Some(StatusIndicator::WAITING)),
                other => (other, None),
            },
        }
    }
}

/// Lifecycle signals that drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityEvent {
    /// The transport opened (or re-opened) the stream.
    TransportOpen,
    /// A `Success` envelope was decoded.
    EnvelopeSuccess,
    /// A `Waiting` envelope was decoded.
    EnvelopeWaiting,
    /// An `Error` envelope was decoded.
    EnvelopeError,
    /// The transport reported a connection failure.
    TransportError,
    /// Explicit session shutdown.
    Shutdown,
}

impl From<&Envelope> for ConnectivityEvent {
    fn from(envelope: &Envelope) -> Self {
        match envelope {
            Envelope::Success(_) => Self::EnvelopeSuccess,
            Envelope::Waiting => Self::EnvelopeWaiting,
            Envelope::Error => Self::EnvelopeError,
        }
    }
}

// =============================================================================
// Status Indicator
// =============================================================================

/// Color tone for the status surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    /// Affirmative (connected).
    Positive,
    /// Degraded but expected to recover on its own.
    Warning,
    /// Error condition.
    Alert,
}

/// Label and tone published to the status surface on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    /// Human-readable status text.
    pub label: &'static str,
    /// Color tone for the rendering host.
    pub tone: StatusTone,
}

impl StatusIndicator {
    /// Stream open and delivering data.
    pub const CONNECTED: Self = Self {
        label: "Connected",
        tone: StatusTone::Positive,
    };

    /// Stream open, no data upstream yet.
    pub const WAITING: Self = Self {
        label: "Waiting for data...",
        tone: StatusTone::Warning,
    };

    /// Upstream reported an error condition.
    pub const UPSTREAM_ERROR: Self = Self {
        label: "Error occurred",
        tone: StatusTone::Alert,
    };

    /// The transport lost the connection and is retrying.
    pub const RECONNECTING: Self = Self {
        label: "Connection error. Trying to reconnect...",
        tone: StatusTone::Alert,
    };
}

// =============================================================================
// Tracker
// =============================================================================

/// Holds the current connectivity state and applies lifecycle events.
#[derive(Debug)]
pub struct ConnectivityTracker {
    state: ConnectivityState,
}

impl ConnectivityTracker {
    /// Create a tracker in the initial `Connecting` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ConnectivityState::Connecting,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> ConnectivityState {
        self.state
    }

    /// Apply a lifecycle event and return the indicator to publish, if any.
    pub fn apply(&mut self, event: ConnectivityEvent) -> Option<StatusIndicator> {
        let (next, indicator) = self.state.apply(event);
        self.state = next;
        indicator
    }
}

impl Default for ConnectivityTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use ConnectivityEvent as Event;
    use ConnectivityState as State;

    #[test_case(State::Connecting, Event::TransportOpen => State::Connected; "connecting opens")]
    #[test_case(State::Errored, Event::TransportOpen => State::Connected; "reopen after error")]
    #[test_case(State::Waiting, Event::TransportOpen => State::Connected; "reopen while waiting")]
    #[test_case(State::Connected, Event::EnvelopeWaiting => State::Waiting; "connected to waiting")]
    #[test_case(State::Connecting, Event::EnvelopeWaiting => State::Connecting; "waiting ignored before open")]
    #[test_case(State::Errored, Event::EnvelopeWaiting => State::Errored; "waiting ignored in error")]
    #[test_case(State::Connected, Event::EnvelopeSuccess => State::Connected; "success keeps connected")]
    #[test_case(State::Waiting, Event::EnvelopeSuccess => State::Connected; "success leaves waiting")]
    #[test_case(State::Connecting, Event::EnvelopeSuccess => State::Connecting; "success ignored before open")]
    #[test_case(State::Errored, Event::EnvelopeSuccess => State::Errored; "success ignored in error")]
    #[test_case(State::Connected, Event::EnvelopeError => State::Errored; "upstream error")]
    #[test_case(State::Connecting, Event::TransportError => State::Errored; "transport error while connecting")]
    #[test_case(State::Waiting, Event::TransportError => State::Errored; "transport error while waiting")]
    #[test_case(State::Connected, Event::Shutdown => State::Closed; "shutdown from connected")]
    #[test_case(State::Errored, Event::Shutdown => State::Closed; "shutdown from error")]
    fn transition(state: State, event: Event) -> State {
        state.apply(event).0
    }

    #[test]
    fn transitions_are_total() {
        let states = [
            State::Connecting,
            State::Connected,
            State::Waiting,
            State::Errored,
            State::Closed,
        ];
        let events = [
            Event::TransportOpen,
            Event::EnvelopeSuccess,
            Event::EnvelopeWaiting,
            Event::EnvelopeError,
            Event::TransportError,
            Event::Shutdown,
        ];

        for state in states {
            for event in events {
                // Every pair produces a defined next state without panicking.
                let (next, _) = state.apply(event);
                if state.is_closed() {
                    assert_eq!(next, State::Closed);
                }
            }
        }
    }

    #[test]
    fn closed_absorbs_every_event() {
        let events = [
            Event::TransportOpen,
            Event::EnvelopeSuccess,
            Event::EnvelopeWaiting,
            Event::EnvelopeError,
            Event::TransportError,
            Event::Shutdown,
        ];

        for event in events {
            let (next, indicator) = State::Closed.apply(event);
            assert_eq!(next, State::Closed);
            assert!(indicator.is_none());
        }
    }

    #[test]
    fn indicators_match_trigger() {
        let (_, opened) = State::Connecting.apply(Event::TransportOpen);
        assert_eq!(opened, Some(StatusIndicator::CONNECTED));

        let (_, waiting) = State::Connected.apply(Event::EnvelopeWaiting);
        assert_eq!(waiting, Some(StatusIndicator::WAITING));

        let (_, upstream) = State::Connected.apply(Event::EnvelopeError);
        assert_eq!(upstream, Some(StatusIndicator::UPSTREAM_ERROR));

        let (_, transport) = State::Connected.apply(Event::TransportError);
        assert_eq!(transport, Some(StatusIndicator::RECONNECTING));
        assert_eq!(transport.map(|indicator| indicator.tone), Some(StatusTone::Alert));
    }

    #[test]
    fn tracker_starts_connecting_and_tracks_state() {
        let mut tracker = ConnectivityTracker::new();
        assert_eq!(tracker.state(), State::Connecting);

        let indicator = tracker.apply(Event::TransportOpen);
        assert_eq!(tracker.state(), State::Connected);
        assert_eq!(indicator, Some(StatusIndicator::CONNECTED));

        tracker.apply(Event::Shutdown);
        assert!(tracker.state().is_closed());
        assert!(tracker.apply(Event::TransportOpen).is_none());
        assert!(tracker.state().is_closed());
    }

    #[test]
    fn envelope_kinds_map_to_events() {
        use crate::domain::snapshot::PriceSnapshot;

        assert_eq!(
            Event::from(&Envelope::Success(PriceSnapshot::default())),
            Event::EnvelopeSuccess
        );
        assert_eq!(Event::from(&Envelope::Waiting), Event::EnvelopeWaiting);
        assert_eq!(Event::from(&Envelope::Error), Event::EnvelopeError);
    }
}
