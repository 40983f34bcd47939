//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations behind the port
//! interfaces defined in the application layer.

/// Wire-frame decoding into domain envelopes.
pub mod codec;

/// Numeric formatting with placeholder fallback.
pub mod format;

/// SSE transport adapter with reconnect policy.
pub mod sse;

/// Terminal presentation adapter.
pub mod console;

/// Configuration loading from the environment.
pub mod config;

/// Tracing initialization.
pub mod telemetry;
