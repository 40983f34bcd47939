#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::option_if_let_else,
        clippy::default_trait_access
    )
)]

//! Ticker Stream - Resilient Price-Stream Client
//!
//! Maintains exactly one logical subscription to a server-pushed,
//! text-framed price stream and drives an observable presentation state
//! (current value, detail panel, prepend-only history log, connectivity
//! indicator) without ever crashing on malformed or partial input.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Core types with no I/O
//!   - `snapshot`: price snapshots, envelopes, ordered history
//!   - `connectivity`: connection lifecycle state machine
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: transport signal contract, presentation surface interface
//!   - `services`: presentation renderer, stream session
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `codec`: wire-frame decoding into envelopes
//!   - `format`: numeric formatting with placeholder fallback
//!   - `sse`: SSE transport with reconnect policy
//!   - `console`: terminal presentation adapter
//!   - `config`: environment configuration
//!   - `telemetry`: tracing initialization
//!
//! # Data Flow
//!
//! ```text
//! SSE endpoint ──► SseTransport ──► StreamSession ──► ConnectivityTracker
//!                                        │                    │
//!                                        ▼                    ▼
//!                                  codec::decode ──► Renderer ──► surfaces
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Core stream types with no I/O dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::connectivity::{
    ConnectivityEvent, ConnectivityState, ConnectivityTracker, StatusIndicator, StatusTone,
};
pub use domain::snapshot::{Envelope, HistoryEntry, PriceHistory, PriceSnapshot};

// Ports (RecordingSurfaces is exported for integration tests)
pub use application::ports::{PresentationSurfaces, RecordingSurfaces, TransportSignal};

// Services
pub use application::services::render::Renderer;
pub use application::services::session::StreamSession;

// Codec
pub use infrastructure::codec::{DecodeError, decode};

// Infrastructure config
pub use infrastructure::config::{ConfigError, PresentationSettings, StreamSettings, TickerConfig};

// Console presentation adapter
pub use infrastructure::console::ConsoleSurfaces;

// SSE transport (config types for integration tests)
pub use infrastructure::sse::{
    ReconnectConfig, ReconnectPolicy, SseTransport, SseTransportConfig, SseTransportError,
};
