//! Domain-level keyboard actions independent of key bindings.

/// What the user asked the viewer to do.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll up by one line. Default: k/↑
    ScrollUp,
    /// Scroll down by one line. Default: j/↓
    ScrollDown,
    /// Scroll up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Scroll down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Jump to the oldest comment. Default: g/Home
    ScrollToTop,
    /// Jump to the newest comment and follow again. Default: G/End
    ScrollToBottom,

    // Live mode
    /// Toggle following new comments. Default: f
    ToggleFollow,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Check if the action moves the viewport.
    pub fn is_scroll(&self) -> bool {
        !matches!(self, Self::ToggleFollow | Self::Quit)
    }
}
