//! Rate limiting example for addrdb-rs
//!
//! This example demonstrates how to:
//! - Configure a fixed-window limiter
//! - Read the quota from admitted requests
//! - Render a denial
//! - Drive time with a manual clock

use addrdb_core::prelude::*;
use addrdb_core::{ManualClock, MemoryStore};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== addrdb-rs Rate Limiting Example ===\n");

    let clock = Arc::new(ManualClock::new());
    let config = RateLimitConfig::new(Duration::from_secs(60), 5);
    let limiter = RateLimiter::new(config, Arc::new(MemoryStore::new()), clock.clone())?;

    // Example 1: Spend the quota of one client
    println!("--- Example 1: Five requests per minute ---");
    for n in 1..=6 {
        match limiter.allow("203.0.113.7") {
            Decision::Admitted(quota) => println!(
                "#{n}: admitted, {} of {} left, resets in {}s",
                quota.remaining,
                quota.limit,
                quota.reset_after_secs()
            ),
            Decision::Denied(denial) => println!(
                "#{n}: {} {} (retry after {}s)",
                denial.status(),
                denial.message,
                denial.retry_after_secs()
            ),
        }
    }
    println!();

    // Example 2: Other clients have their own window
    println!("--- Example 2: Independent keys ---");
    println!(
        "198.51.100.1 admitted: {}\n",
        limiter.allow("198.51.100.1").is_admitted()
    );

    // Example 3: Time passes
    println!("--- Example 3: Window expiry ---");
    clock.advance(Duration::from_secs(30));
    println!("after 30s: retry after {:?}", limiter.allow("203.0.113.7").retry_after());
    clock.advance(Duration::from_secs(30));
    println!(
        "after 60s: admitted = {}",
        limiter.allow("203.0.113.7").is_admitted()
    );
    println!("tracked keys: {}\n", limiter.tracked_keys());

    // Example 4: The server's default limiter with a background sweeper
    println!("--- Example 4: Production limiter ---");
    let production = RateLimiter::in_memory(RateLimitConfig::default())?;
    println!("{:?}", production.config());
    production.shutdown();

    Ok(())
}
