//! addrdb-cli: inspect and query an address dataset from the terminal
//!
//! Usage examples
//! --------------
//!
//! - Show dataset and index statistics
//!   $ addrdb --input data/addresses.json stats
//!
//! - Search by prefix (street, city or post number by default)
//!   $ addrdb search storg
//!   $ addrdb search 0101 --limit 5
//!
//! - Index municipality instead, and match inside multi-word values
//!   $ addrdb --fields municipality --words search hammer
//!
//! The dataset is loaded and indexed on every run, exactly as the server
//! does at startup.
mod args;

use crate::args::{CliArgs, Commands};
use addrdb_core::{loader, IndexOptions, PrefixIndex, SearchService, Tokenization};
use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let input_path = args.input.unwrap_or_else(loader::default_dataset_path);
    let entries = loader::load_from_path(&input_path)
        .with_context(|| format!("loading {}", input_path.display()))?;

    let tokenization = if args.words {
        Tokenization::Words
    } else {
        Tokenization::WholeValue
    };
    let options = IndexOptions::new(&args.fields, args.min_length).with_tokenization(tokenization);
    let index = PrefixIndex::build_with(entries, options)?;

    match args.command {
        Commands::Stats => {
            let stats = index.stats();
            println!("Dataset statistics:");
            println!("  Addresses: {}", stats.entries);
            println!("  Indexed fields: {}", join_fields(&index));
            println!("  Distinct prefixes: {}", stats.terms);
            println!("  Postings: {}", stats.postings);
        }

        Commands::Search { query, limit, json } => {
            let service = SearchService::with_max_results(index, limit);
            let hits = service.search(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No addresses found matching: {query}");
            } else {
                for a in hits {
                    println!(
                        "{}, {} {} ({})",
                        a.street, a.post_number, a.city, a.municipality
                    );
                }
            }
        }
    }

    Ok(())
}

fn join_fields(index: &PrefixIndex) -> String {
    index
        .options()
        .fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
