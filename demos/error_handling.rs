//! Error handling example for addrdb-rs
//!
//! This example demonstrates the failure modes of startup and queries

use addrdb_core::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== addrdb-rs Error Handling Example ===\n");

    // Example 1: Missing dataset
    println!("--- Example 1: Loading a missing dataset ---");
    match loader::load_from_path("does/not/exist.json") {
        Ok(entries) => println!("✓ Loaded {} addresses", entries.len()),
        Err(e) => println!("✗ {e}"),
    }
    println!();

    // Example 2: Malformed content
    println!("--- Example 2: Malformed dataset ---");
    let broken = r#"[{"city": "Oslo", "street": "1 Main St"}]"#;
    match loader::load_from_reader(broken.as_bytes()) {
        Ok(entries) => println!("✓ Loaded {} addresses", entries.len()),
        Err(AddressError::Json(e)) => println!("✗ rejected: {e}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 3: Invalid configuration
    println!("--- Example 3: Invalid configuration ---");
    for bad in ["zip", "post code"] {
        match bad.parse::<AddressField>() {
            Ok(field) => println!("  parsed {field}"),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    let zero = RateLimitConfig::new(Duration::ZERO, 25);
    if let Err(e) = RateLimiter::in_memory(zero) {
        println!("  ✗ {e}");
    }
    println!();

    // Example 4: Queries never fail, they just match nothing
    println!("--- Example 4: Edge-case queries ---");
    let service = SearchService::new(PrefixIndex::build(
        Vec::<Address>::new(),
        &AddressField::DEFAULT_INDEXED,
        3,
    )?);
    for query in ["", "ab", "   ", "xyz", "🦀🦀🦀"] {
        println!("  {query:?}: {} hit(s)", service.search(query).len());
    }

    Ok(())
}
