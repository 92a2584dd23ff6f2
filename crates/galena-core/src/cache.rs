//! # Pattern Cache
//!
//! Memoization map from an itemset to its computed support, tail
//! probability, and tidset. Filled concurrently during Phase 1 (merged per
//! worker shard), then grown single-threaded for the rest of the run and
//! discarded with it. Entries are never invalidated.

use crate::itemset::{FrequentItemset, Itemset};
use crate::tidset::Tidset;
use std::collections::HashMap;

/// Cached computation for one itemset.
#[derive(Debug, Clone)]
pub struct CachedPattern {
    pub support: usize,
    pub probability: f64,
    /// Owned tidset, kept for intersection when extending the itemset.
    pub tidset: Tidset,
}

impl CachedPattern {
    /// Create a cache entry.
    #[must_use]
    pub fn new(support: usize, probability: f64, tidset: Tidset) -> Self {
        Self {
            support,
            probability,
            tidset,
        }
    }

    /// Re-attach the itemset to form a pattern (tidset stripped).
    #[must_use]
    pub fn to_frequent(&self, itemset: Itemset) -> FrequentItemset {
        FrequentItemset::new(itemset, self.support, self.probability)
    }
}

/// Process-local memoization map, scoped to one mining run.
#[derive(Debug, Clone, Default)]
pub struct PatternCache {
    map: HashMap<Itemset, CachedPattern>,
}

impl PatternCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cache sized for an expected number of entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Look up an itemset.
    #[must_use]
    pub fn get(&self, itemset: &Itemset) -> Option<&CachedPattern> {
        self.map.get(itemset)
    }

    /// Insert or overwrite an entry.
    pub fn insert(&mut self, itemset: Itemset, entry: CachedPattern) {
        self.map.insert(itemset, entry);
    }

    /// Number of cached itemsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over all entries (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, &CachedPattern)> {
        self.map.iter()
    }
}
