//! Rate Limiter Tests
//!
//! Window arithmetic runs against a [`ManualClock`] so expiry can be tested
//! without sleeping.

use super::*;
use std::thread;

fn limiter_with_clock(max: u32, window: Duration) -> (RateLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let limiter = RateLimiter::new(
        RateLimitConfig::new(window, max),
        Arc::new(MemoryStore::new()),
        clock.clone(),
    )
    .unwrap();
    (limiter, clock)
}

// ============================================================
// QUOTA
// ============================================================

#[test]
fn admits_up_to_quota_then_denies() {
    let (limiter, _clock) = limiter_with_clock(25, Duration::from_secs(60));

    for i in 0..25 {
        assert!(limiter.allow("10.0.0.1").is_admitted(), "request {i} should be admitted");
    }
    assert!(!limiter.allow("10.0.0.1").is_admitted());
}

#[test]
fn quota_reports_remaining_allowance() {
    let (limiter, _clock) = limiter_with_clock(3, Duration::from_secs(60));

    let remaining: Vec<u32> = (0..3)
        .map(|_| match limiter.allow("k") {
            Decision::Admitted(quota) => quota.remaining,
            Decision::Denied(_) => panic!("unexpected denial"),
        })
        .collect();
    assert_eq!(remaining, [2, 1, 0]);
}

#[test]
fn denial_does_not_consume_quota() {
    let store = Arc::new(MemoryStore::new());
    let limiter = RateLimiter::new(
        RateLimitConfig::new(Duration::from_secs(60), 1),
        store.clone(),
        Arc::new(ManualClock::new()),
    )
    .unwrap();

    limiter.allow("k");
    for _ in 0..10 {
        assert!(!limiter.allow("k").is_admitted());
    }
    assert_eq!(store.window("k").map(|w| w.count), Some(1));
}

// ============================================================
// WINDOW EXPIRY
// ============================================================

#[test]
fn window_reopens_after_its_duration() {
    let (limiter, clock) = limiter_with_clock(25, Duration::from_secs(60));

    for _ in 0..25 {
        limiter.allow("k");
    }
    assert!(!limiter.allow("k").is_admitted());

    clock.advance(Duration::from_secs(59));
    assert!(!limiter.allow("k").is_admitted());

    clock.advance(Duration::from_secs(1));
    match limiter.allow("k") {
        Decision::Admitted(quota) => assert_eq!(quota.remaining, 24),
        Decision::Denied(_) => panic!("window should have reset"),
    }
}

#[test]
fn retry_after_counts_down_to_window_end() {
    let (limiter, clock) = limiter_with_clock(1, Duration::from_secs(60));
    limiter.allow("k");

    clock.advance(Duration::from_secs(20));
    let decision = limiter.allow("k");
    assert_eq!(decision.retry_after(), Some(Duration::from_secs(40)));

    match decision {
        Decision::Denied(denial) => {
            assert_eq!(denial.status(), 429);
            assert_eq!(denial.retry_after_secs(), 40);
            assert_eq!(&*denial.message, DEFAULT_MESSAGE);
        }
        Decision::Admitted(_) => unreachable!(),
    }
}

#[test]
fn retry_after_secs_rounds_up_and_is_never_zero() {
    let denial = Denial {
        limit: 1,
        retry_after: Duration::from_millis(1500),
        message: Arc::from("slow down"),
    };
    assert_eq!(denial.retry_after_secs(), 2);

    let almost_over = Denial {
        retry_after: Duration::ZERO,
        ..denial
    };
    assert_eq!(almost_over.retry_after_secs(), 1);
}

#[test]
fn admitted_quota_reports_time_to_reset() {
    let (limiter, clock) = limiter_with_clock(5, Duration::from_secs(60));
    limiter.allow("k");
    clock.advance(Duration::from_secs(15));

    match limiter.allow("k") {
        Decision::Admitted(quota) => assert_eq!(quota.reset_after, Duration::from_secs(45)),
        Decision::Denied(_) => panic!("unexpected denial"),
    }

    clock.advance(Duration::from_millis(500));
    match limiter.allow("k") {
        Decision::Admitted(quota) => assert_eq!(quota.reset_after_secs(), 45),
        Decision::Denied(_) => panic!("unexpected denial"),
    }
}

#[test]
fn limiters_with_separate_clocks_share_windows_through_the_store() {
    let start = Timestamp::from_unix(Duration::from_secs(1_700_000_000));
    let store: Arc<dyn CounterStore> = Arc::new(MemoryStore::new());
    let config = RateLimitConfig::new(Duration::from_secs(60), 1);

    let first = RateLimiter::new(
        config.clone(),
        Arc::clone(&store),
        Arc::new(ManualClock::starting_at(start)),
    )
    .unwrap();
    let later = Arc::new(ManualClock::starting_at(start.saturating_add(Duration::from_secs(20))));
    let second = RateLimiter::new(config, store, later.clone()).unwrap();

    assert!(first.allow("k").is_admitted());
    assert_eq!(second.allow("k").retry_after(), Some(Duration::from_secs(40)));

    later.advance(Duration::from_secs(40));
    assert!(second.allow("k").is_admitted());
}

// ============================================================
// KEY ISOLATION & RESET
// ============================================================

#[test]
fn keys_are_independent() {
    let (limiter, _clock) = limiter_with_clock(25, Duration::from_secs(60));

    for _ in 0..25 {
        limiter.allow("A");
    }
    assert!(!limiter.allow("A").is_admitted());
    assert!(limiter.allow("B").is_admitted());
}

#[test]
fn reset_all_restores_every_quota() {
    let (limiter, _clock) = limiter_with_clock(2, Duration::from_secs(60));
    for key in ["a", "b"] {
        limiter.allow(key);
        limiter.allow(key);
        assert!(!limiter.allow(key).is_admitted());
    }

    limiter.reset_all();
    assert_eq!(limiter.tracked_keys(), 0);
    assert!(limiter.allow("a").is_admitted());
    assert!(limiter.allow("b").is_admitted());
}

#[test]
fn clones_share_one_store() {
    let (limiter, _clock) = limiter_with_clock(1, Duration::from_secs(60));
    let other = limiter.clone();

    assert!(limiter.allow("k").is_admitted());
    assert!(!other.allow("k").is_admitted());
}

// ============================================================
// CONFIGURATION & LIFECYCLE
// ============================================================

#[test]
fn invalid_configs_are_rejected() {
    let store: Arc<dyn CounterStore> = Arc::new(MemoryStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

    let zero_window = RateLimitConfig::new(Duration::ZERO, 25);
    let zero_max = RateLimitConfig::new(Duration::from_secs(60), 0);

    assert!(RateLimiter::new(zero_window, store.clone(), clock.clone()).is_err());
    assert!(RateLimiter::new(zero_max, store, clock).is_err());
}

#[test]
fn custom_message_is_carried_by_denials() {
    let limiter = RateLimiter::new(
        RateLimitConfig::new(Duration::from_secs(1), 1).with_message("busy"),
        Arc::new(MemoryStore::new()),
        Arc::new(ManualClock::new()),
    )
    .unwrap();
    limiter.allow("k");

    match limiter.allow("k") {
        Decision::Denied(denial) => assert_eq!(&*denial.message, "busy"),
        Decision::Admitted(_) => panic!("should be denied"),
    }
}

#[test]
fn in_memory_limiter_shuts_down_repeatedly() {
    let limiter = RateLimiter::in_memory(RateLimitConfig::default()).unwrap();
    assert!(limiter.allow("k").is_admitted());

    limiter.shutdown();
    limiter.shutdown();
    assert!(limiter.allow("k").is_admitted());
}

// ============================================================
// CONCURRENCY
// ============================================================

#[test]
fn concurrent_requests_for_one_key_never_exceed_quota() {
    let limiter = RateLimiter::new(
        RateLimitConfig::new(Duration::from_secs(3600), 25),
        Arc::new(MemoryStore::new()),
        Arc::new(SystemClock::new()),
    )
    .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let limiter = limiter.clone();
            thread::spawn(move || (0..50).filter(|_| limiter.allow("shared").is_admitted()).count())
        })
        .collect();

    let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(admitted, 25);
}

#[test]
fn concurrent_keys_each_get_their_own_quota() {
    let limiter = RateLimiter::new(
        RateLimitConfig::new(Duration::from_secs(3600), 10),
        Arc::new(MemoryStore::new()),
        Arc::new(SystemClock::new()),
    )
    .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let limiter = limiter.clone();
            thread::spawn(move || {
                let key = format!("client-{n}");
                (0..20).filter(|_| limiter.allow(&key).is_admitted()).count()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10);
    }
    assert_eq!(limiter.tracked_keys(), 8);
}
