//! Console Presentation Adapter
//!
//! Renders the presentation surfaces as lines on the terminal. The value and
//! detail regions print their latest content, status changes print with a
//! color matching their tone, and history lines print as they are prepended.

use crate::application::ports::PresentationSurfaces;
use crate::domain::connectivity::{StatusIndicator, StatusTone};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

const fn tone_color(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Positive => GREEN,
        StatusTone::Warning => YELLOW,
        StatusTone::Alert => RED,
    }
}

/// Terminal-backed presentation surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSurfaces;

impl ConsoleSurfaces {
    /// Create the console surfaces.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PresentationSurfaces for ConsoleSurfaces {
    fn show_current_value(&mut self, text: &str) {
        println!("Current price: {text}");
    }

    fn show_detail(&mut self, text: &str) {
        println!("{text}");
    }

    fn show_status(&mut self, indicator: &StatusIndicator) {
        let color = tone_color(indicator.tone);
        println!("{color}{}{RESET}", indicator.label);
    }

    fn push_history_line(&mut self, line: &str) {
        println!("  {line}");
    }
}
