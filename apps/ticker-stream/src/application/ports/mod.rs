//! Port Interfaces
//!
//! Defines the interfaces (ports) between the stream-ingestion core and its
//! external collaborators, following the Hexagonal Architecture pattern.
//!
//! ## Driven Ports (Outbound)
//!
//! - [`PresentationSurfaces`]: the addressable output regions owned by the
//!   rendering host (current value, detail, status, history log). The core
//!   treats them as opaque sinks accepting formatted strings; surfaces are
//!   injected at construction, never looked up ambiently.
//!
//! ## Driver Signals (Inbound)
//!
//! - [`TransportSignal`]: the three lifecycle signals a transport adapter
//!   delivers to the session, in arrival order, over a channel. This replaces
//!   ambient mutable callback slots with an explicit contract; cancellation
//!   is a single idempotent token shared with the adapter.

use crate::domain::connectivity::StatusIndicator;

// =============================================================================
// Transport Signals
// =============================================================================

/// Lifecycle signal delivered by the transport adapter.
///
/// The transport owns retry and backoff; after a `Failed` signal it keeps
/// reconnecting on its own until cancelled, and announces recovery with the
/// next `Opened`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportSignal {
    /// The stream connection was established (or re-established).
    Opened,
    /// One raw text frame arrived on the stream.
    Frame(String),
    /// The connection failed; the reason is for logging and the status
    /// surface only.
    Failed(String),
}

// =============================================================================
// Presentation Surfaces
// =============================================================================

/// The addressable output regions the renderer drives.
///
/// Implementations must tolerate being called repeatedly with identical
/// content; the core overwrites the value and detail regions in place and
/// only ever prepends to the history log.
pub trait PresentationSurfaces: Send {
    /// Overwrite the current-value region.
    fn show_current_value(&mut self, text: &str);

    /// Overwrite the detail region.
    fn show_detail(&mut self, text: &str);

    /// Overwrite the status region.
    fn show_status(&mut self, indicator: &StatusIndicator);

    /// Prepend one line to the history log region.
    fn push_history_line(&mut self, line: &str);
}

// =============================================================================
// Recording Surfaces (for tests)
// =============================================================================

/// In-memory surfaces that record everything written to them.
///
/// Used by unit and integration tests to observe the presentation state
/// without a rendering host.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurfaces {
    /// Last value written to the current-value region.
    pub current_value: Option<String>,
    /// Last value written to the detail region.
    pub detail: Option<String>,
    /// Every indicator written to the status region, in order.
    pub statuses: Vec<StatusIndicator>,
    /// History log lines, newest first.
    pub history_lines: Vec<String>,
}

impl RecordingSurfaces {
    /// Create empty recording surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently written status indicator, if any.
    #[must_use]
    pub fn last_status(&self) -> Option<&StatusIndicator> {
        self.statuses.last()
    }
}

impl PresentationSurfaces for RecordingSurfaces {
    fn show_current_value(&mut self, text: &str) {
        self.current_value = Some(text.to_string());
    }

    fn show_detail(&mut self, text: &str) {
        self.detail = Some(text.to_string());
    }

    fn show_status(&mut self, indicator: &StatusIndicator) {
        self.statuses.push(*indicator);
    }

    fn push_history_line(&mut self, line: &str) {
        self.history_lines.insert(0, line.to_string());
    }
}
