// crates/addrdb-core/src/lib.rs

//! # addrdb-core
//!
//! Address lookup by partial text over a fixed, in-memory dataset.
//!
//! The crate has two engines:
//!
//! - [`PrefixIndex`] / [`SearchService`]: a case-insensitive prefix index over a
//!   configurable set of [`AddressField`]s, built once and read concurrently.
//! - [`RateLimiter`]: a fixed-window admission gate keyed by client identity,
//!   backed by a swappable [`CounterStore`].
//!
//! ```rust
//! use addrdb_core::{Address, AddressField, PrefixIndex, SearchService};
//!
//! let oslo = Address {
//!     street: "1 Main St".into(),
//!     city: "Oslo".into(),
//!     post_number: "0101".into(),
//!     ..Address::default()
//! };
//!
//! let index = PrefixIndex::build(vec![oslo], &AddressField::DEFAULT_INDEXED, 3).unwrap();
//! let service = SearchService::new(index);
//!
//! assert_eq!(service.search("OSL").len(), 1);
//! assert!(service.search("os").is_empty());
//! ```

pub mod error;
pub mod index;
pub mod limiter;
pub mod loader; // The public loader
pub mod model;
pub mod search;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::error::{AddressError, Result};
pub use crate::index::{IndexOptions, PrefixIndex, Tokenization};
pub use crate::limiter::{
    Clock, CounterStore, Decision, Denial, ManualClock, MemoryStore, Quota, RateLimitConfig,
    RateLimiter, SystemClock, Timestamp, Window,
};
pub use crate::model::{Address, AddressField, IndexStats};
pub use crate::search::SearchService;
pub use crate::text::fold_key;
pub use crate::traits::AddressLookup;

pub mod prelude {
    pub use crate::error::{AddressError, Result};
    pub use crate::index::{IndexOptions, PrefixIndex, Tokenization};
    pub use crate::limiter::{Decision, RateLimitConfig, RateLimiter};
    pub use crate::loader;
    pub use crate::model::{Address, AddressField};
    pub use crate::search::SearchService;
    pub use crate::traits::AddressLookup;
}
