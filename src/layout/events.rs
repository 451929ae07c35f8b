//! Observer lists and the deferred task queue.
//!
//! A [`Publisher`] holds an ordered set of subscriber callbacks. Callbacks run
//! in subscription order, synchronously, every time an event is published.
//! Subscriptions are removed only through [`Publisher::unsubscribe`].
//!
//! The [`TaskQueue`] carries work that must run strictly after the current
//! mutation's notifications have been delivered ("next tick"). The host drains
//! it explicitly; nothing runs on a timer.

use std::collections::VecDeque;
use std::fmt;

/// Handle returned by [`Publisher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered observer list.
pub struct Publisher<E: ?Sized> {
    subscribers: Vec<(SubscriptionId, Callback<E>)>,
    next_id: u64,
}

impl<E: ?Sized> Publisher<E> {
    /// Create a publisher with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback. It runs after every callback registered before it.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber in subscription order.
    pub fn publish(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E: ?Sized> Default for Publisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for Publisher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Work deferred until after the current mutation has published its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Tell the rendering surface to follow the manager's `scroll_top`.
    /// The value is read when the task runs, not when it is queued.
    ScrollCorrection,
}

/// FIFO of deferred tasks. Identical pending tasks are coalesced.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<DeferredTask>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task unless an identical one is already pending.
    ///
    /// Returns false when the task was coalesced.
    pub fn push(&mut self, task: DeferredTask) -> bool {
        if self.tasks.contains(&task) {
            return false;
        }
        self.tasks.push_back(task);
        true
    }

    /// Take every pending task, oldest first.
    pub fn drain(&mut self) -> Vec<DeferredTask> {
        self.tasks.drain(..).collect()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if no task is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
