//! LayoutManager - virtualized window computation over variable-height rows.
//!
//! Owns the item sequence and the viewport. Every mutation runs to
//! completion synchronously, recomputes the visible window, publishes the
//! new [`Layout`] to layout subscribers and, when the manager's scroll
//! position is authoritative (auto-scroll, clamping, height corrections),
//! tells scroll subscribers where the rendering surface must scroll to.
//!
//! # Notification order
//!
//! Within one mutation, layout-changed always precedes scroll-changed.
//! Corrections for rows remeasured inside the visible window are queued and
//! only dispatched by [`LayoutManager::run_deferred`], which the host calls
//! once it has painted the new layout.

use super::error::LayoutError;
use super::events::{DeferredTask, Publisher, SubscriptionId, TaskQueue};
use super::item_store::ItemStore;
use super::slots::{Published, SlotRecycler, Window};
use super::types::{Item, Layout, LayoutOptions, ViewportState};
use crate::model::UpdateVariation;
use tracing::{debug, trace, warn};

/// Tolerance when comparing scroll offsets that went through different
/// summation orders.
const OFFSET_EPSILON: f64 = 1e-6;

/// Where a batch of remeasured rows falls relative to the published window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightImpact {
    /// Auto-scroll is on; the window is re-anchored at the bottom anyway.
    Pinned,
    /// Every changed row is above the window.
    Above,
    /// Some changed row is above the window's last row.
    Overlapping,
    /// Every changed row is at or below the window's last row.
    Below,
}

impl HeightImpact {
    /// Classify changed indices `min..=max` against `window`.
    pub fn classify(window: Option<Window>, min: usize, max: usize, auto_scroll: bool) -> Self {
        if auto_scroll {
            return Self::Pinned;
        }
        match window {
            Some(w) if max < w.first => Self::Above,
            Some(w) if min < w.last => Self::Overlapping,
            _ => Self::Below,
        }
    }
}

/// Virtualized list layout engine.
pub struct LayoutManager {
    items: ItemStore,
    options: LayoutOptions,
    viewport: ViewportState,
    layout: Layout,
    /// Scroll offset the published rows' `display_top`s were computed for.
    published_scroll_top: f64,
    recycler: SlotRecycler,
    deferred: TaskQueue,
    layout_changed: Publisher<Layout>,
    scroll_changed: Publisher<f64>,
}

impl LayoutManager {
    /// Create a manager with no rows.
    ///
    /// # Panics
    ///
    /// Panics if `options.min_row_height` is not finite and positive.
    pub fn new(options: LayoutOptions) -> Self {
        Self::with_rows(options, 0)
    }

    /// Create a manager holding `row_count` rows of estimated height.
    ///
    /// # Panics
    ///
    /// Panics if `options.min_row_height` is not finite and positive.
    pub fn with_rows(options: LayoutOptions, row_count: usize) -> Self {
        assert!(
            options.min_row_height.is_finite() && options.min_row_height > 0.0,
            "min_row_height must be finite and positive (got {})",
            options.min_row_height
        );

        let mut manager = Self {
            items: ItemStore::with_uniform(row_count, options.min_row_height),
            options,
            viewport: ViewportState::new(options.auto_scroll),
            layout: Layout::default(),
            published_scroll_top: 0.0,
            recycler: SlotRecycler::new(options.empty_placeholder),
            deferred: TaskQueue::new(),
            layout_changed: Publisher::new(),
            scroll_changed: Publisher::new(),
        };
        manager.recompute(None, Some(options.auto_scroll));
        manager
    }

    // ===== Subscriptions =====

    /// Subscribe to layout recomputations.
    pub fn on_layout_changed(&mut self, callback: impl FnMut(&Layout) + 'static) -> SubscriptionId {
        self.layout_changed.subscribe(callback)
    }

    /// Subscribe to authoritative scroll positions the surface must follow.
    pub fn on_scroll(&mut self, callback: impl FnMut(&f64) + 'static) -> SubscriptionId {
        self.scroll_changed.subscribe(callback)
    }

    /// Remove a layout subscription. Returns false if it was not registered.
    pub fn unsubscribe_layout(&mut self, id: SubscriptionId) -> bool {
        self.layout_changed.unsubscribe(id)
    }

    /// Remove a scroll subscription. Returns false if it was not registered.
    pub fn unsubscribe_scroll(&mut self, id: SubscriptionId) -> bool {
        self.scroll_changed.unsubscribe(id)
    }

    // ===== Accessors =====

    /// Last published layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current viewport state.
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> f64 {
        self.viewport.scroll_top
    }

    /// Check if stick-to-latest mode is on.
    pub fn is_auto_scroll(&self) -> bool {
        self.viewport.auto_scroll
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.items.len()
    }

    /// Layout facts of one row.
    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// The whole item sequence.
    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Options this manager was built with.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Largest valid scroll offset for the current content and viewport.
    pub fn max_scroll_top(&self) -> f64 {
        (self.items.scroll_height() - self.viewport.height).max(0.0)
    }

    /// Number of deferred tasks waiting for [`run_deferred`](Self::run_deferred).
    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    // ===== Mutations =====

    /// Resize the viewport.
    ///
    /// Keeps the top row anchored; with auto-scroll the bottom stays anchored
    /// instead.
    ///
    /// # Panics
    ///
    /// Panics on negative or non-finite dimensions.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        assert!(
            width.is_finite() && width >= 0.0 && height.is_finite() && height >= 0.0,
            "viewport size must be finite and non-negative (got {}x{})",
            width,
            height
        );
        if width == self.viewport.width && height == self.viewport.height {
            return;
        }
        debug!(width, height, "viewport resized");
        self.viewport.width = width;
        self.viewport.height = height;
        self.recompute(None, Some(self.viewport.auto_scroll));
    }

    /// Move the viewport to `top`, as reported by the rendering surface.
    ///
    /// Scrolling up disarms auto-scroll. Scrolling down re-arms it when the
    /// new position lands closer to the bottom than
    /// [`LayoutOptions::rearm_distance`].
    ///
    /// # Panics
    ///
    /// Panics on a negative or non-finite position.
    pub fn set_scroll_position(&mut self, top: f64) {
        assert!(
            top.is_finite() && top >= 0.0,
            "scroll position must be finite and non-negative (got {})",
            top
        );
        if top == self.viewport.scroll_top {
            return;
        }

        let previous = self.viewport.scroll_top;
        let max_scroll = self.max_scroll_top();
        let target = top.min(max_scroll);
        let auto_scroll = if target < previous {
            false
        } else {
            max_scroll - target < self.options.rearm_distance()
        };
        trace!(previous, target, auto_scroll, "scroll position set");

        self.viewport.scroll_top = target;
        self.recompute(None, Some(auto_scroll));
    }

    /// Turn stick-to-latest mode on or off explicitly.
    pub fn set_auto_scroll(&mut self, enabled: bool) {
        if enabled == self.viewport.auto_scroll {
            return;
        }
        self.recompute(None, Some(enabled));
    }

    /// Grow or shrink the sequence to `row_count` rows.
    ///
    /// New rows take `heights[i]`, or the estimated row height where
    /// `heights` is shorter than the number of added rows. `heights` is
    /// ignored when shrinking. An unchanged count is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `heights` holds more entries than rows being added, or any
    /// height is negative or non-finite.
    pub fn set_row_count(&mut self, row_count: usize, heights: Option<&[f64]>) {
        let current = self.items.len();
        if row_count == current {
            return;
        }

        let net_height = if row_count > current {
            let added = row_count - current;
            let heights = heights.unwrap_or(&[]);
            assert!(
                heights.len() <= added,
                "{} heights given for {} added rows",
                heights.len(),
                added
            );
            let min_height = self.options.min_row_height;
            self.items
                .extend((0..added).map(|i| heights.get(i).copied().unwrap_or(min_height)))
        } else {
            -self.items.truncate(row_count)
        };
        debug!(from = current, to = row_count, net_height, "row count changed");

        if self.viewport.auto_scroll {
            self.viewport.scroll_top += net_height;
        }
        self.recompute(Some(0.0), Some(self.viewport.auto_scroll));
    }

    /// Append rows with the given heights.
    pub fn append_rows(&mut self, heights: &[f64]) {
        self.set_row_count(self.items.len() + heights.len(), Some(heights));
    }

    /// Apply a row variation from the ingestion side.
    ///
    /// Only [`UpdateVariation::Append`] can be expressed without a reindexing
    /// policy; the others are rejected before any state changes.
    pub fn apply_variation(
        &mut self,
        variation: UpdateVariation,
        added: usize,
        heights: Option<&[f64]>,
    ) -> Result<(), LayoutError> {
        match variation {
            UpdateVariation::Append => {
                self.set_row_count(self.items.len() + added, heights);
                Ok(())
            }
            UpdateVariation::Update | UpdateVariation::Delete => {
                warn!(?variation, "row variation rejected");
                Err(LayoutError::UnsupportedVariation(variation))
            }
        }
    }

    /// Feed measured heights back as `(index, height)` pairs.
    ///
    /// Rows above the window shift the scroll offset by their delta so the
    /// window does not move on screen. Rows remeasured inside the window
    /// shift it by the delta above the window's last row, and the matching
    /// scroll notification is deferred to [`run_deferred`](Self::run_deferred).
    /// Nothing happens if no height actually changed.
    ///
    /// # Panics
    ///
    /// Panics on an out-of-range index or a negative or non-finite height.
    pub fn change_row_height(&mut self, updates: &[(usize, f64)]) {
        let window = self.published_window();

        let mut total_delta = 0.0;
        let mut delta_above_last = 0.0;
        let mut changed: Option<(usize, usize)> = None;
        for &(index, height) in updates {
            let delta = self.items.set_height(index, height);
            if delta == 0.0 {
                continue;
            }
            total_delta += delta;
            if window.is_some_and(|w| index < w.last) {
                delta_above_last += delta;
            }
            changed = Some(match changed {
                Some((min, max)) => (min.min(index), max.max(index)),
                None => (index, index),
            });
        }
        let Some((min, max)) = changed else {
            return;
        };

        self.items.rebuild_tops_from(min);

        let impact = HeightImpact::classify(window, min, max, self.viewport.auto_scroll);
        debug!(?impact, min, max, total_delta, "row heights changed");
        match impact {
            HeightImpact::Above => self.viewport.scroll_top += total_delta,
            HeightImpact::Overlapping => self.viewport.scroll_top += delta_above_last,
            HeightImpact::Pinned | HeightImpact::Below => {}
        }

        // Rows of the published window are untouched when every change lies
        // outside it; only their absolute tops may have moved.
        let stable_shift = match window {
            Some(w) if max < w.first => Some(total_delta),
            Some(w) if min > w.last => Some(0.0),
            _ => None,
        };
        let auto_override = self.viewport.auto_scroll.then_some(true);
        let scrolled = self.recompute(stable_shift, auto_override);

        match impact {
            HeightImpact::Above if !scrolled => {
                let top = self.viewport.scroll_top;
                self.scroll_changed.publish(&top);
            }
            HeightImpact::Overlapping if !scrolled => {
                self.deferred.push(DeferredTask::ScrollCorrection);
            }
            _ => {}
        }
    }

    /// Run tasks deferred by earlier mutations. Returns how many ran.
    ///
    /// Call once the layout published by those mutations has been painted.
    pub fn run_deferred(&mut self) -> usize {
        let tasks = self.deferred.drain();
        for task in &tasks {
            match task {
                DeferredTask::ScrollCorrection => {
                    let top = self.viewport.scroll_top;
                    trace!(top, "deferred scroll correction");
                    self.scroll_changed.publish(&top);
                }
            }
        }
        tasks.len()
    }

    // ===== Recomputation =====

    fn published_window(&self) -> Option<Window> {
        self.layout
            .window()
            .map(|(first, last)| Window { first, last })
    }

    /// Recompute the visible window and publish.
    ///
    /// `stable_shift` is a caller guarantee that every item of the published
    /// window kept its height and had its top moved by exactly that amount;
    /// it enables the row-array skip. `auto_override` forces the
    /// auto-scroll mode, otherwise it is inferred from the bottom alignment.
    ///
    /// Returns true when a scroll notification was published.
    fn recompute(&mut self, stable_shift: Option<f64>, auto_override: Option<bool>) -> bool {
        let previous = Published {
            slot_count: self.layout.rows.len(),
            window: self.published_window(),
        };
        let scroll_height = self.items.scroll_height();
        let max_scroll = self.max_scroll_top();

        let requested = self.viewport.scroll_top;
        let mut scroll_top = requested.clamp(0.0, max_scroll);
        let auto_scroll = auto_override.unwrap_or(scroll_top >= max_scroll);

        let window = match self.items.last() {
            None => None,
            Some(last) if auto_scroll => {
                scroll_top = max_scroll;
                Some(Window {
                    first: self.items.row_at(scroll_top),
                    last: last.index,
                })
            }
            Some(_) => Some(Window {
                first: self.items.row_at(scroll_top),
                last: self.items.row_at(scroll_top + self.viewport.height),
            }),
        };
        self.viewport.scroll_top = scroll_top;
        self.viewport.auto_scroll = auto_scroll;

        let rows_stable = stable_shift.is_some_and(|shift| {
            (scroll_top - self.published_scroll_top - shift).abs() <= OFFSET_EPSILON
        });
        if rows_stable && self.recycler.can_skip(previous, window) {
            trace!("visible rows unchanged, keeping published row array");
        } else {
            self.layout.rows =
                self.recycler
                    .assign(&self.items, window, previous.slot_count, scroll_top);
            self.layout.visible_row_count = window.map_or(0, |w| w.len());
        }
        self.published_scroll_top = scroll_top;
        self.layout.scroll_height = scroll_height;

        trace!(
            scroll_top,
            scroll_height,
            visible = self.layout.visible_row_count,
            auto_scroll,
            "layout recomputed"
        );
        self.layout_changed.publish(&self.layout);

        if auto_scroll || scroll_top != requested {
            self.scroll_changed.publish(&scroll_top);
            return true;
        }
        false
    }
}

impl std::fmt::Debug for LayoutManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutManager")
            .field("rows", &self.items.len())
            .field("viewport", &self.viewport)
            .field("layout", &self.layout)
            .field("pending_deferred", &self.deferred.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
