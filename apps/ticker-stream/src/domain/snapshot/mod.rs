//! Price Snapshot Types
//!
//! Canonical domain types for the price stream: the snapshot carried by a
//! single update, the decoded envelope tagged by upstream status, and the
//! ordered presentation history.
//!
//! These types are codec-agnostic; the wire-level decoding rules live in
//! `infrastructure::codec`.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

// =============================================================================
// Snapshot
// =============================================================================

/// One price observation with optional auxiliary statistics.
///
/// Every numeric field other than the timestamp is independently optional:
/// a field that was absent from the wire payload, or carried a non-numeric
/// value, is `None` and renders as the formatter's placeholder. The two
/// protocol variants (countdown-only and 24h-statistics) share this single
/// type, with the fields of the other variant simply absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    /// Latest price in USD. Required for a "valid" snapshot, but absence is
    /// tolerated all the way to the rendered surfaces.
    pub price: Option<f64>,
    /// When the upstream produced this observation. Defaults to the decode
    /// time when the payload carries no usable timestamp.
    pub last_updated: DateTime<Utc>,
    /// Highest price over the trailing 24 hours.
    pub high_24h: Option<f64>,
    /// Lowest price over the trailing 24 hours.
    pub low_24h: Option<f64>,
    /// Absolute price change over the trailing 24 hours.
    pub price_change_24h: Option<f64>,
    /// Relative price change over the trailing 24 hours, in percent.
    pub price_change_percentage_24h: Option<f64>,
    /// Seconds until the next update (simplest protocol variant only).
    pub countdown_seconds: Option<f64>,
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self {
            price: None,
            last_updated: Utc::now(),
            high_24h: None,
            low_24h: None,
            price_change_24h: None,
            price_change_percentage_24h: None,
            countdown_seconds: None,
        }
    }
}

// =============================================================================
// Envelope
// =============================================================================

/// The top-level decoded message, tagged by upstream status.
///
/// A bare payload without a `status` discriminant decodes as an implicit
/// [`Envelope::Success`] for compatibility with the legacy wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Envelope {
    /// Upstream delivered a snapshot.
    Success(PriceSnapshot),
    /// Upstream has no data available yet.
    Waiting,
    /// Upstream reported an error condition.
    Error,
}

impl Envelope {
    /// The snapshot carried by this envelope, if any.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&PriceSnapshot> {
        match self {
            Self::Success(snapshot) => Some(snapshot),
            Self::Waiting | Self::Error => None,
        }
    }

    /// Check whether this envelope carries data.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

// =============================================================================
// History
// =============================================================================

/// An immutable rendering of one successfully decoded snapshot plus its
/// arrival order.
///
/// Entries expose read access only; once inserted into the history they are
/// never mutated or reordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    sequence: u64,
    snapshot: PriceSnapshot,
}

impl HistoryEntry {
    /// Monotonic arrival order, starting at 1 for the first entry.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The snapshot recorded in this entry.
    #[must_use]
    pub const fn snapshot(&self) -> &PriceSnapshot {
        &self.snapshot
    }
}

/// Ordered history of rendered snapshots with newest-first insertion.
///
/// Insertion is monotonic head-prepend only. Retention is bounded by a
/// configurable cap that evicts from the tail; `0` means unbounded, following
/// the same convention as the reconnect policy's attempt limit.
#[derive(Debug, Default)]
pub struct PriceHistory {
    entries: VecDeque<HistoryEntry>,
    next_sequence: u64,
    retention_cap: usize,
}

impl PriceHistory {
    /// Create a history with the given retention cap (`0` = unbounded).
    #[must_use]
    pub fn new(retention_cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_sequence: 0,
            retention_cap,
        }
    }

    /// Prepend a snapshot as the newest entry and return it.
    ///
    /// When the retention cap is exceeded the oldest entries are evicted
    /// from the tail; the head order is never disturbed.
    pub fn prepend(&mut self, snapshot: PriceSnapshot) -> &HistoryEntry {
        self.next_sequence += 1;
        self.entries.push_front(HistoryEntry {
            sequence: self.next_sequence,
            snapshot,
        });

        if self.retention_cap > 0 {
            self.entries.truncate(self.retention_cap);
        }

        // Just pushed, so the front always exists.
        &self.entries[0]
    }

    /// Iterate entries newest-first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recently inserted entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the history holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured retention cap (`0` = unbounded).
    #[must_use]
    pub const fn retention_cap(&self) -> usize {
        self.retention_cap
    }
}

// =============================================================================
// Tests
// =============================================================================
