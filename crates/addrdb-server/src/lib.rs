// crates/addrdb-server/src/lib.rs

//! # addrdb-server
//!
//! HTTP front end for [`addrdb_core`]: one search route, a JSON error
//! envelope, security headers and per-client rate limiting in production.
//!
//! The binary in `main.rs` wires everything from [`config::ServerConfig`];
//! tests build an [`state::AppState`] directly and drive
//! [`routes::create_router`] in-process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{Mode, ServerConfig};
pub use error::{ApiError, ErrorBody, ErrorDetail};
pub use routes::create_router;
pub use state::AppState;
