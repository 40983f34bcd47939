//! Configuration Module
//!
//! Configuration loading for the ticker client.

mod settings;

pub use settings::{ConfigError, PresentationSettings, StreamSettings, TickerConfig};
