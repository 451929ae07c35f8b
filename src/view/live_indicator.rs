//! LIVE indicator for the status bar.
//!
//! Gray for a static file or a stream that ended, blinking green while a
//! live source is still streaming.

use crate::source::InputSource;
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Text content for the LIVE indicator.
const LIVE_INDICATOR_TEXT: &str = "[LIVE] ";

/// Streaming state of the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Read-once file.
    Static,
    /// Live source still producing records.
    Streaming,
    /// Live source reached its end.
    Eof,
}

impl InputMode {
    /// Initial mode for a source: streaming if any part of it is live.
    pub fn for_source(source: &InputSource) -> Self {
        if source.is_live() {
            Self::Streaming
        } else {
            Self::Static
        }
    }

    /// Mode after a poll, given whether the source is still live.
    pub fn after_poll(self, still_live: bool) -> Self {
        match self {
            Self::Streaming if !still_live => Self::Eof,
            other => other,
        }
    }
}

/// Pure, stateless indicator. The blink phase is owned by the event loop.
#[derive(Debug, Clone)]
pub struct LiveIndicator {
    mode: InputMode,
    blink_on: bool,
}

impl LiveIndicator {
    /// Create an indicator for `mode` in the given blink phase.
    pub fn new(mode: InputMode, blink_on: bool) -> Self {
        Self { mode, blink_on }
    }

    /// Render the indicator as a ratatui Span.
    ///
    /// The hidden blink phase renders blanks of the same width, so the rest
    /// of the status bar does not shift.
    pub fn render(&self) -> Span<'static> {
        match self.mode {
            InputMode::Static | InputMode::Eof => {
                Span::styled(LIVE_INDICATOR_TEXT, Style::default().fg(Color::Gray))
            }
            InputMode::Streaming if self.blink_on => {
                Span::styled(LIVE_INDICATOR_TEXT, Style::default().fg(Color::Green))
            }
            InputMode::Streaming => Span::raw(" ".repeat(LIVE_INDICATOR_TEXT.len())),
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "live_indicator_tests.rs"]
mod tests;
