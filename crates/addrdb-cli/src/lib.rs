//! addrdb-cli
//! ==========
//!
//! Command-line interface for the `addrdb-core` address index.
//!
//! This crate primarily provides a binary (`addrdb-cli`); the library target
//! only carries this overview.
//!
//! ```text
//! addrdb-cli --help
//! addrdb-cli --input data/addresses.json stats
//! addrdb-cli search storgata --limit 5
//! addrdb-cli --words --fields street search gate
//! ```
//!
//! For programmatic access use the `addrdb-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
