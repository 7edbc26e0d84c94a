// crates/addrdb-core/src/limiter/mod.rs

//! # Rate Limiter
//!
//! Fixed-window request admission keyed by client identity.
//!
//! For a key with window `(count, started)` and a request at `now`:
//!
//! - no window, or `now >= started + window`: start a new window, admit.
//! - `count < max_requests`: count the request, admit.
//! - otherwise deny, retry after `started + window - now`.
//!
//! Bursts of up to twice the quota can straddle a window boundary. The limiter
//! only decides; rendering a denial (status, headers, body) is the caller's
//! job, and so is deciding whether to consult the limiter at all.

mod clock;
mod memory;
mod store;

pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use memory::MemoryStore;
pub use store::{CounterStore, Window};

use crate::error::{AddressError, Result};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
pub const DEFAULT_MAX_REQUESTS: u32 = 25;
pub const DEFAULT_MESSAGE: &str =
    "Too many requests from this IP, please try again after a minute.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Length of one counting window.
    pub window: Duration,
    /// Requests admitted per key per window.
    pub max_requests: u32,
    /// Human-readable text carried by every denial.
    pub message: String,
}

impl RateLimitConfig {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            message: DEFAULT_MESSAGE.to_string(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.is_zero() {
            return Err(AddressError::InvalidConfig(
                "rate-limit window must be greater than zero".into(),
            ));
        }
        if self.max_requests == 0 {
            return Err(AddressError::InvalidConfig(
                "rate-limit max_requests must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MAX_REQUESTS)
    }
}

/// Remaining allowance after an admitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window closes.
    pub reset_after: Duration,
}

impl Quota {
    /// `reset_after` rounded up to whole seconds.
    pub fn reset_after_secs(&self) -> u64 {
        ceil_secs(self.reset_after)
    }
}

/// Everything a caller needs to render a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denial {
    pub limit: u32,
    pub retry_after: Duration,
    pub message: Arc<str>,
}

impl Denial {
    /// HTTP "Too Many Requests".
    pub const STATUS: u16 = 429;

    pub fn status(&self) -> u16 {
        Self::STATUS
    }

    /// `retry_after` in whole seconds, rounded up and never zero, as the
    /// `Retry-After` header wants it.
    pub fn retry_after_secs(&self) -> u64 {
        ceil_secs(self.retry_after).max(1)
    }
}

/// Outcome of [`RateLimiter::allow`]. A denial is a normal return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admitted(Quota),
    Denied(Denial),
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admitted(_))
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Decision::Admitted(_) => None,
            Decision::Denied(denial) => Some(denial.retry_after),
        }
    }
}

/// Request-admission gate. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    message: Arc<str>,
    store: Arc<dyn CounterStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(
        config: RateLimitConfig,
        store: Arc<dyn CounterStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            message: Arc::from(config.message.as_str()),
            config,
            store,
            clock,
        })
    }

    /// System clock and a [`MemoryStore`] swept once per window.
    pub fn in_memory(config: RateLimitConfig) -> Result<Self> {
        config.validate()?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
        let store = MemoryStore::with_sweeper(config.window, config.window, Arc::clone(&clock))?;
        Self::new(config, Arc::new(store), clock)
    }

    /// Counts a request from `key` and decides whether it may proceed.
    pub fn allow(&self, key: &str) -> Decision {
        let now = self.clock.now();
        let length = self.config.window;
        let max = self.config.max_requests;
        let mut admitted = true;

        let window = self.store.update(key, &mut |current| match current {
            Some(w) if !w.is_expired(length, now) => {
                if w.count < max {
                    admitted = true;
                    Window {
                        count: w.count + 1,
                        ..w
                    }
                } else {
                    admitted = false;
                    w
                }
            }
            _ => {
                admitted = true;
                Window::open(now)
            }
        });

        let left = window.expires_at(length).saturating_duration_since(now);
        if admitted {
            Decision::Admitted(Quota {
                limit: max,
                remaining: max.saturating_sub(window.count),
                reset_after: left,
            })
        } else {
            tracing::debug!(key, retry_after_ms = left.as_millis() as u64, "request denied");
            Decision::Denied(Denial {
                limit: max,
                retry_after: left,
                message: Arc::clone(&self.message),
            })
        }
    }

    /// Forgets every window, e.g. between test cases.
    pub fn reset_all(&self) {
        self.store.reset_all();
    }

    /// Stops the store's background housekeeping. Safe to call repeatedly.
    pub fn shutdown(&self) {
        self.store.shutdown();
    }

    pub fn tracked_keys(&self) -> usize {
        self.store.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .field("tracked_keys", &self.store.len())
            .finish()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

#[cfg(test)]
mod tests;
