use addrdb_core::AddressField;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for addrdb-cli
#[derive(Debug, Parser)]
#[command(
    name = "addrdb",
    version,
    about = "CLI for inspecting and querying an address dataset"
)]
pub struct CliArgs {
    /// Path to the dataset (.json or .json.gz; default: data/addresses.json)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Shortest prefix the index registers
    #[arg(long = "min-length", global = true, default_value_t = 3)]
    pub min_length: usize,

    /// Comma-separated fields to index (e.g. street,city,postNumber)
    #[arg(
        short = 'f',
        long = "fields",
        global = true,
        value_delimiter = ',',
        default_values_t = AddressField::DEFAULT_INDEXED
    )]
    pub fields: Vec<AddressField>,

    /// Also index each word of a field, not only its start
    #[arg(long = "words", global = true)]
    pub words: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset and its index
    Stats,

    /// Search addresses by prefix
    Search {
        /// Prefix to search (case-insensitive)
        query: String,

        /// Maximum number of results
        #[arg(short = 'n', long = "limit", default_value_t = 20)]
        limit: usize,

        /// Print results as a JSON array instead of one line each
        #[arg(long = "json")]
        json: bool,
    },
}
