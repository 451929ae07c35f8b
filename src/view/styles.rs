//! Comment row and status bar styling.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set,
/// whatever its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Read `NO_COLOR` from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicitly enabled or disabled colors.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowStyles =====

/// Styles used by the comment list and the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyles {
    /// Author name prefix of a comment.
    pub author: Style,
    /// Comment body.
    pub text: Style,
    /// Status bar background.
    pub status: Style,
    /// FOLLOW badge.
    pub following: Style,
    /// PAUSED badge.
    pub paused: Style,
    /// Name of a source that is still live.
    pub source_live: Style,
    /// Name of a source that ended or never was live.
    pub source_ended: Style,
}

impl RowStyles {
    /// Styles for the given color configuration. Without colors only
    /// modifiers (bold, reversed) are used.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                author: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                text: Style::default(),
                status: Style::default().bg(Color::DarkGray).fg(Color::White),
                following: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                paused: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                source_live: Style::default().fg(Color::Green),
                source_ended: Style::default().fg(Color::Gray),
            }
        } else {
            Self {
                author: Style::default().add_modifier(Modifier::BOLD),
                text: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
                following: Style::default().add_modifier(Modifier::BOLD),
                paused: Style::default().add_modifier(Modifier::BOLD),
                source_live: Style::default().add_modifier(Modifier::BOLD),
                source_ended: Style::default().add_modifier(Modifier::DIM),
            }
        }
    }
}

impl Default for RowStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}

// ===== Tests =====
