//! Layout dimension and timing constants for TUI rendering.

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_SCROLL_LINES: f64 = 3.0;

/// Upper bound on paint/measure passes per frame.
///
/// Each pass paints the current layout, measures the realized rows and
/// feeds the heights back. Rows usually settle after one correction.
pub const MAX_SETTLE_PASSES: usize = 4;

/// Viewport width used before the terminal reports a usable size.
pub const FALLBACK_WIDTH: u16 = 80;
