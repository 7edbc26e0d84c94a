//! Basic usage example for addrdb-rs
//!
//! This example demonstrates how to:
//! - Load the address dataset
//! - Build a prefix index over the default fields
//! - Search by street, city and post number
//! - Index extra fields and individual words

use addrdb_core::prelude::*;
use std::path::Path;

fn main() -> Result<()> {
    println!("=== addrdb-rs Basic Usage Example ===\n");

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(loader::default_dataset_path());
    println!("Loading {}...", path.display());
    let entries = loader::load_from_path(&path)?;
    println!("✓ Loaded {} addresses\n", entries.len());

    // Example 1: Build the default index (street, city, postNumber; 3+ chars)
    println!("--- Example 1: Build the index ---");
    let index = PrefixIndex::build(entries.clone(), &AddressField::DEFAULT_INDEXED, 3)?;
    let stats = index.stats();
    println!(
        "Entries: {}, prefixes: {}, postings: {}\n",
        stats.entries, stats.terms, stats.postings
    );
    let service = SearchService::new(index);

    // Example 2: Search by city, street and post number
    println!("--- Example 2: Search ---");
    for query in ["osl", "Storgata", "501", "BERG"] {
        let hits = service.search(query);
        println!("{query:?}: {} hit(s)", hits.len());
        for a in hits {
            println!("  {}, {} {}", a.street, a.post_number, a.city);
        }
    }
    println!();

    // Example 3: Below the minimum length nothing matches
    println!("--- Example 3: Short queries ---");
    println!("\"os\": {} hit(s)\n", service.search("os").len());

    // Example 4: Only case is folded: "ÅLES" finds "Ålesund", "ales" does not
    println!("--- Example 4: Folded matching ---");
    for query in ["ÅLES", "åles", "ales"] {
        println!("{query:?}: {} hit(s)", service.search(query).len());
    }
    println!();

    // Example 5: Word tokenization matches inside multi-word values
    println!("--- Example 5: Word prefixes ---");
    let options = IndexOptions::new(&[AddressField::Street, AddressField::County], 3)
        .with_tokenization(Tokenization::Words);
    let words = SearchService::new(PrefixIndex::build_with(entries, options)?);
    for a in words.search("romsdal") {
        println!("  {}, {} ({})", a.street, a.city, a.county);
    }
    for a in words.search("gate") {
        println!("  {}", a.street);
    }

    Ok(())
}
