// crates/addrdb-core/src/loader/mod.rs

//! # Dataset Loader
//!
//! Handles the Physical Layer (I/O, Decompression) and hands the byte stream
//! to `serde_json`. The dataset is one JSON array of address objects.
//!
//! Loading is all-or-nothing: a missing file, an unreadable stream or a single
//! malformed record fails the whole load, and callers are expected to abort
//! startup rather than serve from a partial dataset.

use crate::error::Result;
use crate::model::Address;
use std::io::Read;
use std::path::{Path, PathBuf};

mod common_io;

pub use common_io::open_stream;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_DATASET_FILENAME: &str = "addresses.json";

/// `data/addresses.json`, relative to the working directory.
pub fn default_dataset_path() -> PathBuf {
    Path::new(DEFAULT_DATA_DIR).join(DEFAULT_DATASET_FILENAME)
}

/// Parses a dataset from any byte source.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Address>> {
    let addresses: Vec<Address> = serde_json::from_reader(reader)?;
    Ok(addresses)
}

/// Reads and parses the dataset at `path` (`.json`, or `.json.gz` with the
/// `compact` feature).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Address>> {
    let path = path.as_ref();
    let reader = open_stream(path)?;
    let addresses = load_from_reader(reader)?;

    tracing::info!(
        path = %path.display(),
        records = addresses.len(),
        "address dataset loaded"
    );
    Ok(addresses)
}
