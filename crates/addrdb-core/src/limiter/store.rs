use super::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-key fixed-window state: how many requests were admitted since
/// `started`.
///
/// Plain data with a wall-clock start, so a store may keep it outside the
/// process (serialized with serde) and hand it to any limiter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub count: u32,
    pub started: Timestamp,
}

impl Window {
    pub fn open(now: Timestamp) -> Self {
        Self {
            count: 1,
            started: now,
        }
    }

    pub fn expires_at(&self, length: Duration) -> Timestamp {
        self.started.saturating_add(length)
    }

    pub fn is_expired(&self, length: Duration, now: Timestamp) -> bool {
        now >= self.expires_at(length)
    }
}

/// Counter table behind a [`RateLimiter`](super::RateLimiter).
///
/// The limiter owns the decision logic; a store only guarantees that
/// [`CounterStore::update`] is an atomic read-modify-write per key. Updates to
/// the same key must be serialized, updates to different keys must not wait
/// on each other.
pub trait CounterStore: Send + Sync {
    /// Replaces the window of `key` with `step(current)` and returns the new
    /// value. `current` is `None` when the key has no window yet.
    fn update(&self, key: &str, step: &mut dyn FnMut(Option<Window>) -> Window) -> Window;

    /// Drops every window.
    fn reset_all(&self);

    /// Stops background housekeeping and releases its resources. Idempotent.
    /// The store keeps answering `update` afterwards.
    fn shutdown(&self);

    /// Number of keys currently holding a window.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
