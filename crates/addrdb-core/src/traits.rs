// crates/addrdb-core/src/traits.rs
use crate::model::Address;

/// The query side of the service, as consumed by a request pipeline.
///
/// Given free text, return the (capped) matches or nothing. There are no
/// pagination, sorting or filtering parameters. Implementations must be safe
/// to call from many request handlers at once.
///
/// # Examples
/// ```rust
/// use addrdb_core::{Address, AddressField, AddressLookup, PrefixIndex, SearchService};
///
/// fn first_city(lookup: &dyn AddressLookup, q: &str) -> Option<String> {
///     lookup.search(q).first().map(|a| a.city.clone())
/// }
///
/// let index = PrefixIndex::build(
///     vec![Address { city: "Bergen".into(), ..Address::default() }],
///     &AddressField::DEFAULT_INDEXED,
///     3,
/// )
/// .unwrap();
/// let service = SearchService::new(index);
/// assert_eq!(first_city(&service, "berg").as_deref(), Some("Bergen"));
/// ```
pub trait AddressLookup: Send + Sync {
    fn search<'a>(&'a self, query: &str) -> Vec<&'a Address>;
}
