use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A point in time as an offset from the Unix epoch.
///
/// Unlike `Instant`, a timestamp means the same thing in every process, so a
/// window written by one server can be read back by another through a shared
/// store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(Duration);

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp(Duration::ZERO);

    pub const fn from_unix(since_epoch: Duration) -> Self {
        Self(since_epoch)
    }

    pub const fn since_unix_epoch(&self) -> Duration {
        self.0
    }

    /// `self + by`, clamped at the far end of the range.
    pub fn saturating_add(&self, by: Duration) -> Self {
        Self(self.0.saturating_add(by))
    }

    /// Time from `earlier` to `self`, or zero if `earlier` is later.
    pub fn saturating_duration_since(&self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    fn as_nanos_u64(&self) -> u64 {
        u64::try_from(self.0.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Source of "now" for window arithmetic. Time is only ever sampled, never
/// awaited.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time that never runs backwards.
///
/// Readings come from `SystemTime`. If the system clock is stepped back, the
/// clock keeps returning its latest reading until wall time catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    latest_nanos: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&self, wall: Timestamp) -> Timestamp {
        let nanos = wall.as_nanos_u64();
        let latest = self.latest_nanos.fetch_max(nanos, Ordering::AcqRel);
        Timestamp(Duration::from_nanos(latest.max(nanos)))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.observe(wall_time())
    }
}

fn wall_time() -> Timestamp {
    // A system clock set before 1970 reads as the epoch.
    Timestamp(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO))
}

/// A clock that only moves when told to.
///
/// ```rust
/// use addrdb_core::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(60));
/// assert_eq!(clock.now().saturating_duration_since(start), Duration::from_secs(60));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Starts at the current wall time.
    pub fn new() -> Self {
        Self::starting_at(wall_time())
    }

    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}
