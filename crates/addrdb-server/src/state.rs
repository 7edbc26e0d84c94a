// crates/addrdb-server/src/state.rs
use crate::config::{Mode, ServerConfig};
use addrdb_core::{AddressLookup, RateLimiter};
use std::sync::Arc;

/// Shared, read-only request context. Every component is built once at
/// startup and passed in here; handlers never construct their own.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<dyn AddressLookup>,
    pub limiter: RateLimiter,
    pub mode: Mode,
    pub min_query_length: usize,
}

impl AppState {
    pub fn new(lookup: Arc<dyn AddressLookup>, limiter: RateLimiter, config: &ServerConfig) -> Self {
        Self {
            lookup,
            limiter,
            mode: config.mode,
            min_query_length: config.min_query_length,
        }
    }

    /// The limiter only gates traffic in production.
    pub fn rate_limit_enabled(&self) -> bool {
        self.mode.is_production()
    }
}
