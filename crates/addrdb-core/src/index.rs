// crates/addrdb-core/src/index.rs

//! # Prefix Index
//!
//! A flat map from folded prefix to the positions of the entries carrying that
//! prefix in one of the indexed fields. Built once, then read-only: the index
//! holds no interior mutability, so `&PrefixIndex` can be shared across any
//! number of request handlers without locking.
//!
//! Every bucket lists dataset positions in ascending order and holds each
//! position once, even when the entry reaches the key through several fields
//! (street "Oslo gate" and city "Oslo" both give `osl`). A query is therefore
//! a single bucket lookup with no merge step.

use crate::error::{AddressError, Result};
use crate::model::{Address, AddressField, IndexStats};
use crate::text::{char_len, fold_key, prefixes, words};
use rustc_hash::FxHashMap;

/// How a field value is cut into indexable text before prefixes are taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenization {
    /// Only prefixes of the whole folded value.
    #[default]
    WholeValue,
    /// Prefixes of the whole value, plus prefixes of each whitespace-separated
    /// word in it.
    Words,
}

/// Build-time configuration of a [`PrefixIndex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub fields: Vec<AddressField>,
    /// Shortest prefix, in characters, that becomes a key. Also the shortest
    /// query that can match anything.
    pub min_length: usize,
    pub tokenization: Tokenization,
}

impl IndexOptions {
    pub const DEFAULT_MIN_LENGTH: usize = 3;

    pub fn new(fields: &[AddressField], min_length: usize) -> Self {
        Self {
            fields: fields.to_vec(),
            min_length,
            tokenization: Tokenization::WholeValue,
        }
    }

    pub fn with_tokenization(mut self, tokenization: Tokenization) -> Self {
        self.tokenization = tokenization;
        self
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self::new(&AddressField::DEFAULT_INDEXED, Self::DEFAULT_MIN_LENGTH)
    }
}

/// Read-only prefix index over a fixed set of addresses.
///
/// Postings store entry positions as `u32`, so an index holds at most
/// [`PrefixIndex::MAX_ENTRIES`] addresses; building from more is an
/// [`AddressError::InvalidConfig`].
#[derive(Debug, Clone)]
pub struct PrefixIndex {
    entries: Vec<Address>,
    buckets: FxHashMap<Box<str>, Vec<u32>>,
    options: IndexOptions,
}

impl PrefixIndex {
    pub const MAX_ENTRIES: usize = u32::MAX as usize;

    /// Builds an index on `fields`, registering every folded prefix of at
    /// least `min_length` characters.
    pub fn build(
        entries: impl IntoIterator<Item = Address>,
        fields: &[AddressField],
        min_length: usize,
    ) -> Result<Self> {
        Self::build_with(entries, IndexOptions::new(fields, min_length))
    }

    pub fn build_with(
        entries: impl IntoIterator<Item = Address>,
        options: IndexOptions,
    ) -> Result<Self> {
        let entries: Vec<Address> = entries.into_iter().collect();
        let mut buckets: FxHashMap<Box<str>, Vec<u32>> = FxHashMap::default();

        for (position, entry) in entries.iter().enumerate() {
            let id = entry_id(position)?;
            for &field in &options.fields {
                let folded = fold_key(entry.field(field));
                register(&mut buckets, &folded, id, options.min_length);

                if options.tokenization == Tokenization::Words {
                    for word in words(&folded) {
                        register(&mut buckets, word, id, options.min_length);
                    }
                }
            }
        }

        buckets.shrink_to_fit();

        let index = Self {
            entries,
            buckets,
            options,
        };
        let stats = index.stats();
        tracing::info!(
            entries = stats.entries,
            terms = stats.terms,
            postings = stats.postings,
            min_length = index.options.min_length,
            "prefix index built"
        );
        Ok(index)
    }

    /// All entries indexed under the folded `term`, in dataset order, each
    /// at most once. Terms shorter than the configured minimum match nothing.
    pub fn query(&self, term: &str) -> Vec<&Address> {
        self.matches(term).collect()
    }

    /// Lazy form of [`PrefixIndex::query`].
    pub fn matches<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Address> + 'a {
        let folded = fold_key(term);
        let bucket: &'a [u32] = if char_len(&folded) < self.options.min_length.max(1) {
            &[]
        } else {
            self.buckets
                .get(folded.as_str())
                .map(Vec::as_slice)
                .unwrap_or(&[])
        };
        bucket.iter().map(move |&id| &self.entries[id as usize])
    }

    /// Every dataset record, indexable or not, in load order.
    pub fn entries(&self) -> &[Address] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entries: self.entries.len(),
            terms: self.buckets.len(),
            postings: self.buckets.values().map(Vec::len).sum(),
        }
    }
}

fn entry_id(position: usize) -> Result<u32> {
    u32::try_from(position)
        .ok()
        .filter(|_| position < PrefixIndex::MAX_ENTRIES)
        .ok_or_else(|| {
            AddressError::InvalidConfig(format!(
                "dataset exceeds {} addresses",
                PrefixIndex::MAX_ENTRIES
            ))
        })
}

fn register(buckets: &mut FxHashMap<Box<str>, Vec<u32>>, folded: &str, id: u32, min_length: usize) {
    for prefix in prefixes(folded, min_length) {
        // Entries are registered in ascending order, so a repeat of `id` can
        // only ever be the last element of the bucket.
        match buckets.get_mut(prefix) {
            Some(bucket) => {
                if bucket.last() != Some(&id) {
                    bucket.push(id);
                }
            }
            None => {
                buckets.insert(prefix.into(), vec![id]);
            }
        }
    }
}
