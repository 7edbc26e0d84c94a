// crates/addrdb-core/src/search.rs
use crate::index::PrefixIndex;
use crate::model::{Address, IndexStats};
use crate::traits::AddressLookup;
use std::sync::Arc;

/// Answers queries from a pre-built [`PrefixIndex`], capping each answer.
///
/// The service never loads data itself and has no "not ready" state: its
/// constructors require a built index, so a dataset that failed to load stops
/// startup before a service exists instead of degrading into empty answers.
#[derive(Debug, Clone)]
pub struct SearchService {
    index: Arc<PrefixIndex>,
    max_results: usize,
}

impl SearchService {
    pub const DEFAULT_MAX_RESULTS: usize = 20;

    pub fn new(index: PrefixIndex) -> Self {
        Self::with_max_results(index, Self::DEFAULT_MAX_RESULTS)
    }

    pub fn with_max_results(index: impl Into<Arc<PrefixIndex>>, max_results: usize) -> Self {
        Self {
            index: index.into(),
            max_results,
        }
    }

    /// The first `max_results` matches, in index order. Excess matches are
    /// cut, not sampled or ranked.
    pub fn search(&self, query: &str) -> Vec<&Address> {
        self.index.matches(query).take(self.max_results).collect()
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}

impl AddressLookup for SearchService {
    fn search<'a>(&'a self, query: &str) -> Vec<&'a Address> {
        SearchService::search(self, query)
    }
}
