//! Application Layer - Use cases and port definitions.
//!
//! This layer contains the application services and port interfaces
//! that define how the domain interacts with external systems.

/// Port interfaces for the transport and the presentation host.
pub mod ports;

/// Application services for rendering and session orchestration.
pub mod services;
