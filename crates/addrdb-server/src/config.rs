// crates/addrdb-server/src/config.rs

//! Server configuration.
//!
//! Every value comes from a command-line flag or its environment variable
//! (a `.env` file is read first, see `main.rs`). Configuration is resolved
//! once at startup and handed to the core components as plain constructor
//! arguments; nothing below reads the environment after that.

use addrdb_core::loader;
use addrdb_core::{AddressField, IndexOptions, RateLimitConfig, SearchService, Tokenization};
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Operating mode. Only `production` turns the rate limiter on and hides
/// internal error detail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

/// CLI arguments / environment for addrdb-server
#[derive(Debug, Clone, Parser)]
#[command(
    name = "addrdb-server",
    version,
    about = "HTTP address search over an in-memory prefix index"
)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Operating mode
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Mode::Development)]
    pub mode: Mode,

    /// Path to the address dataset (.json or .json.gz; default: data/addresses.json)
    #[arg(short = 'i', long = "data", env = "ADDRDB_DATA")]
    pub data: Option<PathBuf>,

    /// Prefix all routes are mounted under (e.g. /api)
    #[arg(long, env = "API_PREFIX", default_value = "/")]
    pub api_prefix: String,

    /// Length of one rate-limit window, in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value_t = 60)]
    pub rate_limit_window_secs: u64,

    /// Requests admitted per client per window
    #[arg(long, env = "RATE_LIMIT_MAX", default_value_t = 25)]
    pub rate_limit_max: u32,

    /// Shortest query the API accepts
    #[arg(long, env = "MIN_QUERY_LENGTH", default_value_t = 3)]
    pub min_query_length: usize,

    /// Shortest prefix the index registers
    #[arg(long, env = "INDEX_MIN_LENGTH", default_value_t = IndexOptions::DEFAULT_MIN_LENGTH)]
    pub index_min_length: usize,

    /// Comma-separated fields to index (e.g. street,city,postNumber)
    #[arg(
        long,
        env = "INDEX_FIELDS",
        value_delimiter = ',',
        default_values_t = AddressField::DEFAULT_INDEXED
    )]
    pub index_fields: Vec<AddressField>,

    /// Also index each word of a field, not only its start
    #[arg(long, env = "INDEX_WORDS")]
    pub index_words: bool,

    /// Maximum matches per response
    #[arg(long, env = "MAX_RESULTS", default_value_t = SearchService::DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            mode: Mode::Development,
            data: None,
            api_prefix: "/".into(),
            rate_limit_window_secs: 60,
            rate_limit_max: 25,
            min_query_length: 3,
            index_min_length: IndexOptions::DEFAULT_MIN_LENGTH,
            index_fields: AddressField::DEFAULT_INDEXED.to_vec(),
            index_words: false,
            max_results: SearchService::DEFAULT_MAX_RESULTS,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(loader::default_dataset_path)
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig::new(
            Duration::from_secs(self.rate_limit_window_secs),
            self.rate_limit_max,
        )
    }

    pub fn index_options(&self) -> IndexOptions {
        let tokenization = if self.index_words {
            Tokenization::Words
        } else {
            Tokenization::WholeValue
        };
        IndexOptions::new(&self.index_fields, self.index_min_length).with_tokenization(tokenization)
    }
}
