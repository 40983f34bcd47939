//! Application Services
//!
//! Services that orchestrate domain logic against the ports.
//!
//! - [`render::Renderer`]: drives the presentation surfaces and the ordered
//!   history from decoded envelopes and status indicators.
//! - [`session::StreamSession`]: owns the single transport subscription and
//!   wires its signals to the connectivity tracker and the renderer.

pub mod render;
pub mod session;
