//! Virtualized list layout engine (pure core).
//!
//! - [`ItemStore`]: per-row offsets and heights
//! - [`offset_index`]: coordinate-to-row binary search
//! - [`SlotRecycler`]: stable slot keys for the rendering surface
//! - [`LayoutManager`]: visible window, auto-scroll and height reconciliation
//! - [`Publisher`]/[`TaskQueue`]: ordered notifications and deferred work

pub mod error;
pub mod events;
pub mod item_store;
pub mod manager;
pub mod offset_index;
pub mod slots;
pub mod types;

pub use error::LayoutError;
pub use events::{DeferredTask, Publisher, SubscriptionId, TaskQueue};
pub use item_store::{InvariantViolation, ItemStore};
pub use manager::{HeightImpact, LayoutManager};
pub use slots::{SlotRecycler, Window};
pub use types::{Item, Layout, LayoutOptions, RowContent, SlotKey, ViewportState, VisibleRow};
