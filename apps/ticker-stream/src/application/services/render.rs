//! Presentation Renderer
//!
//! Consumes decoded envelopes and connectivity indicators and updates the
//! injected presentation surfaces. Rendering is purely a function of the
//! latest snapshot and the latest status: no timers, no I/O beyond the
//! surface sinks.

use crate::application::ports::PresentationSurfaces;
use crate::domain::connectivity::StatusIndicator;
use crate::domain::snapshot::{Envelope, HistoryEntry, PriceHistory, PriceSnapshot};
use crate::infrastructure::format;

/// Drives the three observable surfaces plus the ordered history log.
#[derive(Debug)]
pub struct Renderer<S: PresentationSurfaces> {
    surfaces: S,
    history: PriceHistory,
    price_decimals: usize,
}

impl<S: PresentationSurfaces> Renderer<S> {
    /// Create a renderer over the injected surfaces.
    #[must_use]
    pub const fn new(surfaces: S, history: PriceHistory, price_decimals: usize) -> Self {
        Self {
            surfaces,
            history,
            price_decimals,
        }
    }

    /// Render one decoded envelope.
    ///
    /// `Success` overwrites the current-value and detail regions and prepends
    /// an immutable history entry. `Waiting` and `Error` leave every surface
    /// untouched; their status side effects arrive separately through
    /// [`Renderer::render_status`].
    pub fn render(&mut self, envelope: &Envelope) {
        let Envelope::Success(snapshot) = envelope else {
            return;
        };

        self.surfaces
            .show_current_value(&format::usd(snapshot.price, self.price_decimals));
        self.surfaces
            .show_detail(&detail_line(snapshot, self.price_decimals));

        let entry = self.history.prepend(snapshot.clone());
        let line = history_line(entry, self.price_decimals);
        self.surfaces.push_history_line(&line);
    }

    /// Publish a connectivity indicator to the status surface and annotate
    /// the history log with a status-only line.
    ///
    /// Annotations never create history entries.
    pub fn render_status(&mut self, indicator: &StatusIndicator) {
        self.surfaces.show_status(indicator);
        self.surfaces.push_history_line(indicator.label);
    }

    /// The ordered snapshot history.
    #[must_use]
    pub const fn history(&self) -> &PriceHistory {
        &self.history
    }

    /// Read access to the surfaces (used by tests).
    #[must_use]
    pub const fn surfaces(&self) -> &S {
        &self.surfaces
    }
}

/// Format the detail region: 24h statistics, timestamp, and the countdown
/// when the simple protocol variant supplies one. Each field falls back to
/// the placeholder independently.
fn detail_line(snapshot: &PriceSnapshot, decimals: usize) -> String {
    let mut line = format!(
        "High 24h: {}, Low 24h: {}, Change 24h: {} ({}), Updated: {}",
        format::usd(snapshot.high_24h, decimals),
        format::usd(snapshot.low_24h, decimals),
        format::usd(snapshot.price_change_24h, decimals),
        format::percent(snapshot.price_change_percentage_24h),
        format::timestamp(snapshot.last_updated),
    );
    if let Some(countdown) = snapshot.countdown_seconds {
        line.push_str(&format!(
            ", Next update in: {} seconds",
            format::fixed(Some(countdown), 0)
        ));
    }
    line
}

/// Format one history log line for a snapshot entry.
fn history_line(entry: &HistoryEntry, decimals: usize) -> String {
    let snapshot = entry.snapshot();
    let price = format::usd(snapshot.price, decimals);
    snapshot.countdown_seconds.map_or_else(
        || {
            format!(
                "Price: {price}, Change 24h: {}",
                format::percent(snapshot.price_change_percentage_24h)
            )
        },
        |countdown| {
            format!(
                "Price: {price}, Countdown: {}s",
                format::fixed(Some(countdown), 0)
            )
        },
    )
}

// =============================================================================
// Tests
// =============================================================================
