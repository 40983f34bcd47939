//! Presentation Formatting
//!
//! Numeric rendering for the presentation surfaces. Every helper is total:
//! unknown or non-finite values render as the single [`PLACEHOLDER`] string
//! instead of failing, and that fallback applies uniformly wherever a
//! snapshot field reaches a rendered surface.

use chrono::{DateTime, Utc};

/// Fallback shown for any unavailable numeric value.
pub const PLACEHOLDER: &str = "Loading...";

/// Render a value with a fixed number of decimals, or the placeholder.
#[must_use]
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(number) if number.is_finite() => format!("{number:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render a USD amount (`$` prefix), or the placeholder.
#[must_use]
pub fn usd(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(number) if number.is_finite() => format!("${number:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render a percentage with two decimals, or the placeholder.
#[must_use]
pub fn percent(value: Option<f64>) -> String {
    match value {
        Some(number) if number.is_finite() => format!("{number:.2}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render a timestamp for human consumption.
#[must_use]
pub fn timestamp(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
