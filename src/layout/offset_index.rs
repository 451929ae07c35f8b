//! OffsetIndex - O(log n) coordinate-to-row search
//!
//! Binary search over the monotonic `top` field of an item sequence.
//! Callers must rebuild the cumulative tops (suffix rebuild) before
//! searching after a height change.
//!
//! # Complexity
//!
//! - `row_at`: O(log n)

use super::types::Item;

/// Returns the greatest index `i` such that `items[i].top <= y`.
///
/// Clamped to the last index when `y` is past the content and to 0 when the
/// sequence is empty or `y <= items[0].top`.
///
/// # Examples
///
/// ```
/// # use lcv::layout::offset_index::row_at;
/// # use lcv::layout::Item;
/// let items = [
///     Item { index: 0, top: 0.0, height: 10.0 },
///     Item { index: 1, top: 10.0, height: 20.0 },
///     Item { index: 2, top: 30.0, height: 15.0 },
/// ];
/// assert_eq!(row_at(&items, 0.0), 0);
/// assert_eq!(row_at(&items, 29.9), 1);
/// assert_eq!(row_at(&items, 30.0), 2);
/// assert_eq!(row_at(&items, 1000.0), 2);
/// ```
pub fn row_at(items: &[Item], y: f64) -> usize {
    // Number of items whose top is at or above y; tops are non-decreasing
    // so this is a valid partition predicate.
    items.partition_point(|item| item.top <= y).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items_from_heights(heights: &[f64]) -> Vec<Item> {
        let mut top = 0.0;
        heights
            .iter()
            .enumerate()
            .map(|(index, &height)| {
                let item = Item { index, top, height };
                top += height;
                item
            })
            .collect()
    }

    #[test]
    fn empty_sequence_returns_zero() {
        assert_eq!(row_at(&[], 0.0), 0);
        assert_eq!(row_at(&[], 500.0), 0);
    }

    #[test]
    fn coordinate_on_boundary_belongs_to_next_row() {
        let items = items_from_heights(&[10.0, 10.0, 10.0]);
        assert_eq!(row_at(&items, 9.99), 0);
        assert_eq!(row_at(&items, 10.0), 1);
        assert_eq!(row_at(&items, 20.0), 2);
    }

    #[test]
    fn coordinate_past_content_clamps_to_last() {
        let items = items_from_heights(&[10.0, 10.0, 10.0]);
        assert_eq!(row_at(&items, 30.0), 2);
        assert_eq!(row_at(&items, 1e9), 2);
    }

    #[test]
    fn negative_coordinate_clamps_to_first() {
        let items = items_from_heights(&[10.0, 10.0]);
        assert_eq!(row_at(&items, -5.0), 0);
    }

    #[test]
    fn zero_height_rows_resolve_to_greatest_index() {
        // Rows 1 and 2 share top 10.0 because row 1 has zero height.
        let items = items_from_heights(&[10.0, 0.0, 10.0]);
        assert_eq!(row_at(&items, 10.0), 2);
    }

    proptest! {
        /// row_at(y) satisfies items[i].top <= y and (i is last or items[i+1].top > y)
        #[test]
        fn prop_row_at_brackets_coordinate(
            heights in prop::collection::vec(0.0f64..=50.0, 1..60),
            y in 0.0f64..=3000.0
        ) {
            let items = items_from_heights(&heights);
            let i = row_at(&items, y);

            prop_assert!(i < items.len());
            prop_assert!(items[i].top <= y);
            if i + 1 < items.len() {
                prop_assert!(items[i + 1].top > y);
            }
        }
    }
}
