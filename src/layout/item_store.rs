//! ItemStore - ordered per-row layout facts with cumulative offsets
//!
//! # Complexity
//!
//! - `extend`: O(added)
//! - `truncate`: O(1) amortized
//! - `set_height`: O(1)
//! - `rebuild_tops_from`: O(n - index)
//! - `scroll_height`: O(1)

use super::offset_index;
use super::types::Item;

/// Violation of the cumulative-offset invariant, reported by
/// [`ItemStore::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// `items[index].index != index`
    #[error("item at position {position} carries index {index}")]
    IndexMismatch {
        /// Position in the sequence.
        position: usize,
        /// Index stored in the item.
        index: usize,
    },
    /// `items[index].top != sum(items[..index].height)`
    #[error("item {index} has top {actual}, expected {expected}")]
    TopMismatch {
        /// Offending item.
        index: usize,
        /// Expected cumulative offset.
        expected: f64,
        /// Stored offset.
        actual: f64,
    },
    /// Negative or non-finite height.
    #[error("item {index} has invalid height {height}")]
    InvalidHeight {
        /// Offending item.
        index: usize,
        /// Stored height.
        height: f64,
    },
}

/// Ordered sequence of [`Item`]s, index-contiguous from 0.
///
/// Pure data: the only behavior is offset bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `count` rows of the same height.
    pub fn with_uniform(count: usize, height: f64) -> Self {
        let mut store = Self::new();
        store.extend(std::iter::repeat(height).take(count));
        store
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Last item, if any.
    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// All items in order.
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Total content height: `last.top + last.height`, or 0 when empty.
    pub fn scroll_height(&self) -> f64 {
        self.items.last().map_or(0.0, Item::bottom)
    }

    /// Index of the row covering coordinate `y`. See [`offset_index::row_at`].
    pub fn row_at(&self, y: f64) -> usize {
        offset_index::row_at(&self.items, y)
    }

    /// Append rows with the given heights, continuing the cumulative sum.
    ///
    /// Existing items are not touched. Returns the total added height.
    ///
    /// # Panics
    ///
    /// Panics if any height is negative or not finite.
    pub fn extend(&mut self, heights: impl IntoIterator<Item = f64>) -> f64 {
        let start_top = self.scroll_height();
        let mut top = start_top;
        for height in heights {
            assert_valid_height(height);
            let index = self.items.len();
            self.items.push(Item { index, top, height });
            top += height;
        }
        top - start_top
    }

    /// Drop every item at or after `len`. Returns the removed height.
    pub fn truncate(&mut self, len: usize) -> f64 {
        if len >= self.items.len() {
            return 0.0;
        }
        let before = self.scroll_height();
        self.items.truncate(len);
        before - self.scroll_height()
    }

    /// Rewrite the height of one item without touching any `top`.
    ///
    /// Returns the height delta. Callers must follow up with
    /// [`rebuild_tops_from`](Self::rebuild_tops_from) when the delta is
    /// non-zero.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()` or the height is negative or not finite.
    pub fn set_height(&mut self, index: usize, height: f64) -> f64 {
        assert!(
            index < self.items.len(),
            "index {} out of bounds (len: {})",
            index,
            self.items.len()
        );
        assert_valid_height(height);

        let item = &mut self.items[index];
        let delta = height - item.height;
        item.height = height;
        delta
    }

    /// Suffix rebuild: recompute `top` for every item from `index` to the end.
    pub fn rebuild_tops_from(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let mut top = match index {
            0 => 0.0,
            _ => self.items[index - 1].bottom(),
        };
        for item in &mut self.items[index..] {
            item.top = top;
            top += item.height;
        }
    }

    /// Check the cumulative-offset invariant over the whole sequence.
    ///
    /// Tops are compared exactly: every top is produced by the same
    /// left-to-right summation this check performs.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut expected = 0.0;
        for (position, item) in self.items.iter().enumerate() {
            if item.index != position {
                return Err(InvariantViolation::IndexMismatch {
                    position,
                    index: item.index,
                });
            }
            if !(item.height.is_finite() && item.height >= 0.0) {
                return Err(InvariantViolation::InvalidHeight {
                    index: position,
                    height: item.height,
                });
            }
            if item.top != expected {
                return Err(InvariantViolation::TopMismatch {
                    index: position,
                    expected,
                    actual: item.top,
                });
            }
            expected += item.height;
        }
        Ok(())
    }
}

fn assert_valid_height(height: f64) {
    assert!(
        height.is_finite() && height >= 0.0,
        "row height must be finite and non-negative (got {})",
        height
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_store_has_zero_scroll_height() {
        let store = ItemStore::new();
        assert!(store.is_empty());
        assert_eq!(store.scroll_height(), 0.0);
        assert_eq!(store.validate(), Ok(()));
    }

    #[test]
    fn extend_continues_cumulative_sum() {
        let mut store = ItemStore::with_uniform(2, 20.0);
        let added = store.extend([10.0, 30.0]);

        assert_eq!(added, 40.0);
        assert_eq!(store.len(), 4);
        assert_eq!(store.get(2).map(|i| i.top), Some(40.0));
        assert_eq!(store.get(3).map(|i| i.top), Some(50.0));
        assert_eq!(store.scroll_height(), 80.0);
    }

    #[test]
    fn truncate_drops_tail_and_reports_removed_height() {
        let mut store = ItemStore::with_uniform(5, 20.0);
        let removed = store.truncate(2);

        assert_eq!(removed, 60.0);
        assert_eq!(store.len(), 2);
        assert_eq!(store.scroll_height(), 40.0);
    }

    #[test]
    fn truncate_beyond_len_is_noop() {
        let mut store = ItemStore::with_uniform(2, 20.0);
        assert_eq!(store.truncate(10), 0.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn set_height_then_rebuild_shifts_suffix() {
        let mut store = ItemStore::with_uniform(4, 20.0);
        let delta = store.set_height(1, 50.0);
        store.rebuild_tops_from(1);

        assert_eq!(delta, 30.0);
        assert_eq!(store.get(0).map(|i| i.top), Some(0.0));
        assert_eq!(store.get(2).map(|i| i.top), Some(70.0));
        assert_eq!(store.get(3).map(|i| i.top), Some(90.0));
        assert_eq!(store.validate(), Ok(()));
    }

    #[test]
    fn validate_detects_stale_tops() {
        let mut store = ItemStore::with_uniform(3, 20.0);
        store.set_height(0, 40.0);

        assert!(matches!(
            store.validate(),
            Err(InvariantViolation::TopMismatch { index: 1, .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn set_height_panics_past_end() {
        let mut store = ItemStore::with_uniform(1, 20.0);
        store.set_height(1, 10.0);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn extend_panics_on_negative_height() {
        let mut store = ItemStore::new();
        store.extend([-1.0]);
    }

    proptest! {
        /// After any sequence of appends and remeasures, tops stay cumulative.
        #[test]
        fn prop_tops_stay_cumulative(
            initial in prop::collection::vec(0.0f64..=100.0, 0..40),
            updates in prop::collection::vec((0usize..40, 0.0f64..=100.0), 0..20),
            appended in prop::collection::vec(0.0f64..=100.0, 0..10)
        ) {
            let mut store = ItemStore::new();
            store.extend(initial.iter().copied());

            let mut min_changed = usize::MAX;
            for (index, height) in updates {
                if index < store.len() {
                    store.set_height(index, height);
                    min_changed = min_changed.min(index);
                }
            }
            store.rebuild_tops_from(min_changed);
            store.extend(appended.iter().copied());

            prop_assert_eq!(store.validate(), Ok(()));
        }

        /// Appending never rewrites existing items.
        #[test]
        fn prop_extend_preserves_existing_items(
            initial in prop::collection::vec(0.0f64..=100.0, 0..40),
            appended in prop::collection::vec(0.0f64..=100.0, 0..10)
        ) {
            let mut store = ItemStore::new();
            store.extend(initial.iter().copied());
            let before = store.as_slice().to_vec();

            store.extend(appended.iter().copied());

            prop_assert_eq!(&store.as_slice()[..before.len()], &before[..]);
        }
    }
}
