//! # Itemset
//!
//! Canonical item sets and the mined-pattern value types built on them.
//!
//! An [`Itemset`] is a sorted, duplicate-free array of item ids. The sorted
//! array is preferred over a bit-vector because the vocabulary is usually
//! much larger than the average itemset, and it gives equal itemsets an
//! identical iteration order for free, which in turn makes hashing and the
//! lexicographic tie-breaks deterministic.
//!
//! A [`FrequentItemset`] attaches the probabilistic support and its tail
//! probability to an itemset; it is the unit stored in the top-k heap, the
//! frontier, and the final result list.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// ITEMSET
// =============================================================================

/// A set of item ids in canonical (ascending) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Itemset {
    items: Vec<ItemId>,
}

impl Itemset {
    /// The empty itemset.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Singleton `{item}`.
    #[must_use]
    pub fn single(item: ItemId) -> Self {
        Self { items: vec![item] }
    }

    /// Pair `{a, b}` in canonical order. `a` and `b` must differ.
    #[must_use]
    pub fn pair(a: ItemId, b: ItemId) -> Self {
        debug_assert_ne!(a, b);
        Self {
            items: vec![a.min(b), a.max(b)],
        }
    }

    /// Build from arbitrary item ids; sorts and deduplicates.
    #[must_use]
    pub fn from_items(mut items: Vec<ItemId>) -> Self {
        items.sort_unstable();
        items.dedup();
        Self { items }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the itemset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Membership test (binary search over the sorted array).
    #[must_use]
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.binary_search(&item).is_ok()
    }

    /// Largest item id, or `None` when empty. Canonical extensions may only
    /// add items strictly greater than this.
    #[must_use]
    pub fn max_item(&self) -> Option<ItemId> {
        self.items.last().copied()
    }

    /// Union with another itemset (sorted merge).
    #[must_use]
    pub fn union(&self, other: &Itemset) -> Itemset {
        let mut items = Vec::with_capacity(self.items.len() + other.items.len());
        let (mut i, mut j) = (0, 0);
        while i < self.items.len() && j < other.items.len() {
            match self.items[i].cmp(&other.items[j]) {
                Ordering::Less => {
                    items.push(self.items[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    items.push(other.items[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    items.push(self.items[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        items.extend_from_slice(&self.items[i..]);
        items.extend_from_slice(&other.items[j..]);
        Itemset { items }
    }

    /// Union with a single item.
    #[must_use]
    pub fn with_item(&self, item: ItemId) -> Itemset {
        match self.items.binary_search(&item) {
            Ok(_) => self.clone(),
            Err(pos) => {
                let mut items = Vec::with_capacity(self.items.len() + 1);
                items.extend_from_slice(&self.items[..pos]);
                items.push(item);
                items.extend_from_slice(&self.items[pos..]);
                Itemset { items }
            }
        }
    }

    /// The items as a slice, ascending.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Iterate over the items in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// FREQUENT ITEMSET
// =============================================================================

/// An itemset with its probabilistic support and tail probability.
///
/// `support` is the largest integer s with `P(sup(X) >= s) >= tau`;
/// `probability` is `P(sup(X) >= support)` at that level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequentItemset {
    pub itemset: Itemset,
    pub support: usize,
    pub probability: f64,
}

impl FrequentItemset {
    /// Create a mined pattern.
    #[must_use]
    pub fn new(itemset: Itemset, support: usize, probability: f64) -> Self {
        Self {
            itemset,
            support,
            probability,
        }
    }

    /// Result and singleton-list ordering: support descending, probability
    /// descending, items ascending. Total, so sorts are deterministic.
    #[must_use]
    pub fn cmp_by_support(&self, other: &Self) -> Ordering {
        other
            .support
            .cmp(&self.support)
            .then_with(|| other.probability.total_cmp(&self.probability))
            .then_with(|| self.itemset.cmp(&other.itemset))
    }
}

impl fmt::Display for FrequentItemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [sup={}, prob={:.3}]",
            self.itemset, self.support, self.probability
        )
    }
}
