//! Slot recycler - stable key assignment for published rows.
//!
//! A window of `num_views = max(previous_slots, visible_rows)` slots is
//! published. The row at absolute position `first + i` gets slot
//! `(first + i) % num_views`, so a small scroll reuses the same slot for the
//! item that now occupies a screen position instead of allocating a new one.
//! Positions past the visible window are published as placeholders, so the
//! slot pool never shrinks.

use super::item_store::ItemStore;
use super::types::{RowContent, SlotKey, VisibleRow};

/// Inclusive range of item indices chosen for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First visible item.
    pub first: usize,
    /// Last visible item.
    pub last: usize,
}

impl Window {
    /// Number of items in the window.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Always false: a window holds at least one item.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Previous publication, as seen by the stability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Published {
    /// Slots in the previous publication.
    pub slot_count: usize,
    /// Window of the previous publication.
    pub window: Option<Window>,
}

/// Assigns recycled slot keys and decides when a rebuild can be skipped.
#[derive(Debug, Clone, Copy)]
pub struct SlotRecycler {
    empty_placeholder: bool,
}

impl SlotRecycler {
    /// Create a recycler. With `empty_placeholder`, an empty sequence still
    /// publishes one placeholder slot.
    pub fn new(empty_placeholder: bool) -> Self {
        Self { empty_placeholder }
    }

    /// Slot pool size for a candidate window.
    pub fn num_views(&self, previous_slots: usize, window: Option<Window>) -> usize {
        let visible = window.map_or(0, |w| w.len());
        let floor = usize::from(self.empty_placeholder);
        previous_slots.max(visible).max(floor)
    }

    /// True when the published row array can be kept as is: same pool size,
    /// same first and last item, and the window did not grow.
    pub fn can_skip(&self, previous: Published, candidate: Option<Window>) -> bool {
        let (Some(old), Some(new)) = (previous.window, candidate) else {
            return false;
        };
        self.num_views(previous.slot_count, candidate) == previous.slot_count
            && old.first == new.first
            && old.last == new.last
            && new.len() <= old.len()
    }

    /// Build the published rows for `window`.
    ///
    /// `display_top` is each item's `top - scroll_top`.
    pub fn assign(
        &self,
        items: &ItemStore,
        window: Option<Window>,
        previous_slots: usize,
        scroll_top: f64,
    ) -> Vec<VisibleRow> {
        let num_views = self.num_views(previous_slots, window);
        let first = window.map_or(0, |w| w.first);

        (first..first + num_views)
            .map(|position| {
                let key = SlotKey::new(position % num_views);
                let item = window
                    .filter(|w| position <= w.last)
                    .and_then(|_| items.get(position));
                match item {
                    Some(item) => VisibleRow {
                        key,
                        content: RowContent::Item {
                            index: item.index,
                            height: item.height,
                        },
                        display_top: item.top - scroll_top,
                    },
                    None => VisibleRow {
                        key,
                        content: RowContent::Placeholder,
                        display_top: 0.0,
                    },
                }
            })
            .collect()
    }
}
