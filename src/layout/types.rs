//! Core layout newtypes and snapshot types

use std::fmt;

/// Layout facts for one logical row.
///
/// # Invariants
/// - `top == sum(height of every item before this one)`
/// - `height >= 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    /// 0-based position in the item sequence.
    pub index: usize,
    /// Cumulative vertical offset from the start of the content.
    pub top: f64,
    /// Measured or estimated height.
    pub height: f64,
}

impl Item {
    /// Bottom edge of this item (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Recycled identifier of a visual slot on the rendering surface.
///
/// Stable for "the same screen position" across recomputations, not for
/// "the same item".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SlotKey(usize);

impl SlotKey {
    /// Create a slot key from a raw slot number.
    pub fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Get the raw slot number.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a published slot currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowContent {
    /// A real item from the sequence.
    Item {
        /// Item index.
        index: usize,
        /// Item height at publish time.
        height: f64,
    },
    /// Hidden slot kept alive so the slot pool does not shrink.
    Placeholder,
}

/// One slot of a published layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRow {
    /// Recycled slot identifier.
    pub key: SlotKey,
    /// Item shown in the slot, or a placeholder.
    pub content: RowContent,
    /// Offset of the row's top edge relative to the viewport top.
    /// Negative when the row is partially scrolled out above. Always 0 for
    /// placeholders.
    pub display_top: f64,
}

impl VisibleRow {
    /// Index of the item shown in this slot, `None` for placeholders.
    pub fn item_index(&self) -> Option<usize> {
        match self.content {
            RowContent::Item { index, .. } => Some(index),
            RowContent::Placeholder => None,
        }
    }

    /// Check if this slot is an empty placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.content, RowContent::Placeholder)
    }
}

/// Viewport dimensions and scroll state.
///
/// # Invariants
/// - `scroll_top` is clamped into `[0, max(0, scroll_height - height)]`
///   after every mutation.
/// - When `auto_scroll` is set, `scroll_top` is derived from the content end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Offset of the viewport top within the content.
    pub scroll_top: f64,
    /// Stick-to-latest mode.
    pub auto_scroll: bool,
}

impl ViewportState {
    /// Create a zero-sized viewport at the top of the content.
    pub fn new(auto_scroll: bool) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scroll_top: 0.0,
            auto_scroll,
        }
    }
}

/// Immutable layout snapshot handed to the rendering surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Total content height (`last.top + last.height`, or 0 when empty).
    pub scroll_height: f64,
    /// Number of real items in the visible window.
    pub visible_row_count: usize,
    /// Published slots, ordered top to bottom. Real rows come first, then
    /// placeholders.
    pub rows: Vec<VisibleRow>,
}

impl Layout {
    /// Index range `(first, last)` of the visible window, inclusive.
    ///
    /// Returns `None` when no real item is visible.
    pub fn window(&self) -> Option<(usize, usize)> {
        if self.visible_row_count == 0 {
            return None;
        }
        let first = self.rows.first()?.item_index()?;
        let last = self.rows.get(self.visible_row_count - 1)?.item_index()?;
        Some((first, last))
    }

    /// Iterate over the item indices in the visible window.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().filter_map(VisibleRow::item_index)
    }
}

/// Tunable behavior of a [`super::LayoutManager`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Estimated height for rows that have not been measured yet.
    pub min_row_height: f64,
    /// Initial stick-to-latest mode.
    pub auto_scroll: bool,
    /// Publish one placeholder slot while the sequence is empty.
    pub empty_placeholder: bool,
    /// A downward scroll that lands closer than this to the bottom re-arms
    /// auto-scroll. `None` means `min_row_height`.
    pub rearm_threshold: Option<f64>,
}

impl LayoutOptions {
    /// Create options with the given estimated row height and defaults for
    /// everything else.
    pub fn new(min_row_height: f64) -> Self {
        Self {
            min_row_height,
            ..Self::default()
        }
    }

    /// Effective re-arm distance.
    pub fn rearm_distance(&self) -> f64 {
        self.rearm_threshold.unwrap_or(self.min_row_height)
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_row_height: 1.0,
            auto_scroll: true,
            empty_placeholder: true,
            rearm_threshold: None,
        }
    }
}
