//! SSE Transport Adapter
//!
//! Connects to the server-pushed event stream over HTTP and feeds the
//! session's signal channel. The adapter owns the whole retry story:
//! exponential backoff with jitter between attempts, an idle-timeout
//! watchdog while connected, and autonomous reconnection after failures
//! until the shared cancellation token fires.

pub mod client;
pub mod reconnect;

pub use client::{SseTransport, SseTransportConfig, SseTransportError};
pub use reconnect::{ReconnectConfig, ReconnectPolicy};
