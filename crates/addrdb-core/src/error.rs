// crates/addrdb-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading the dataset or wiring the core components.
///
/// Every variant is fatal at startup: the service refuses to run on a
/// dataset it could not read, or on a limiter it could not configure.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The dataset file does not exist or cannot be opened.
    #[error("{0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not a JSON array of well-formed address records.
    #[error("malformed address dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, AddressError>;
