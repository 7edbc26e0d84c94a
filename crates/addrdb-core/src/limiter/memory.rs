// crates/addrdb-core/src/limiter/memory.rs
use super::clock::{Clock, Timestamp};
use super::store::{CounterStore, Window};
use crate::error::{AddressError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// In-process counter table.
///
/// Windows live in a sharded `DashMap`: an update holds the shard lock of its
/// key for the duration of the read-modify-write, so requests for one key are
/// serialized while keys on other shards proceed in parallel.
///
/// Expired windows are harmless (the next request for the key resets them) but
/// take memory, so a store built with [`MemoryStore::with_sweeper`] runs a
/// background thread that drops them periodically. The thread is stopped by
/// [`CounterStore::shutdown`] or when the store is dropped.
pub struct MemoryStore {
    windows: Arc<DashMap<String, Window>>,
    sweeper: Mutex<Option<Sweeper>>,
}

struct Sweeper {
    stop: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl MemoryStore {
    /// A store without background housekeeping.
    pub fn new() -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            sweeper: Mutex::new(None),
        }
    }

    /// A store whose windows of `length` are swept every `interval`, using
    /// `clock` to decide what has expired.
    pub fn with_sweeper(length: Duration, interval: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        if interval.is_zero() {
            return Err(AddressError::InvalidConfig(
                "sweep interval must be greater than zero".into(),
            ));
        }

        let store = Self::new();
        let windows = Arc::clone(&store.windows);
        let (stop, stopped) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("addrdb-limiter-sweeper".into())
            .spawn(move || loop {
                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let removed = sweep_expired(&windows, length, clock.now());
                        if removed > 0 {
                            tracing::debug!(removed, "swept expired rate-limit windows");
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        *store.sweeper.lock() = Some(Sweeper { stop, handle });
        Ok(store)
    }

    /// Removes every window of `length` that has expired at `now`. Returns
    /// how many were removed.
    pub fn sweep(&self, length: Duration, now: Timestamp) -> usize {
        sweep_expired(&self.windows, length, now)
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.lock().is_some()
    }

    pub fn window(&self, key: &str) -> Option<Window> {
        self.windows.get(key).map(|w| *w)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterStore for MemoryStore {
    fn update(&self, key: &str, step: &mut dyn FnMut(Option<Window>) -> Window) -> Window {
        // Hot path: existing key, no allocation.
        if let Some(mut current) = self.windows.get_mut(key) {
            let next = step(Some(*current));
            *current = next;
            return next;
        }

        match self.windows.entry(key.to_owned()) {
            Entry::Occupied(mut occupied) => {
                let next = step(Some(*occupied.get()));
                occupied.insert(next);
                next
            }
            Entry::Vacant(vacant) => {
                let next = step(None);
                vacant.insert(next);
                next
            }
        }
    }

    fn reset_all(&self) {
        self.windows.clear();
    }

    fn shutdown(&self) {
        let Some(sweeper) = self.sweeper.lock().take() else {
            return;
        };
        drop(sweeper.stop);
        if sweeper.handle.join().is_err() {
            tracing::warn!("rate-limit sweeper thread panicked");
        }
    }

    fn len(&self) -> usize {
        self.windows.len()
    }
}

impl Drop for MemoryStore {
    fn drop(&mut self) {
        CounterStore::shutdown(self);
    }
}

fn sweep_expired(windows: &DashMap<String, Window>, length: Duration, now: Timestamp) -> usize {
    let before = windows.len();
    windows.retain(|_, window| !window.is_expired(length, now));
    before.saturating_sub(windows.len())
}
