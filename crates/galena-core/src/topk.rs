//! # Top-K Heap
//!
//! Bounded container of the k best patterns found so far. The weakest
//! element (smallest support, ties broken by smallest probability, then by
//! item order) sits at the top and is displaced when a better pattern
//! arrives.
//!
//! The heap drives the dynamic minimum-support threshold: `min_support()`
//! is 0 until the heap fills, then the support of the weakest element. The
//! threshold therefore only rises during a run, which is what makes the
//! pruning rules safe.

use crate::itemset::FrequentItemset;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry ordered by the eviction key: support ascending, probability
/// ascending, items ascending. The ordering is total, so which of two
/// boundary-tied patterns is retained is deterministic.
#[derive(Debug, Clone)]
struct TopKEntry(FrequentItemset);

impl TopKEntry {
    fn eviction_cmp(&self, other: &Self) -> Ordering {
        self.0
            .support
            .cmp(&other.0.support)
            .then_with(|| self.0.probability.total_cmp(&other.0.probability))
            .then_with(|| self.0.itemset.cmp(&other.0.itemset))
    }
}

impl PartialEq for TopKEntry {
    fn eq(&self, other: &Self) -> bool {
        self.eviction_cmp(other) == Ordering::Equal
    }
}

impl Eq for TopKEntry {}

impl PartialOrd for TopKEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TopKEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.eviction_cmp(other)
    }
}

/// Bounded min-heap of the current top-k patterns.
#[derive(Debug, Clone)]
pub struct TopKHeap {
    heap: BinaryHeap<Reverse<TopKEntry>>,
    capacity: usize,
}

impl TopKHeap {
    /// Create a heap with fixed capacity `k`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Current number of stored patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the heap holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether the heap reached its capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The dynamic minimum-support threshold: 0 while the heap is not full,
    /// afterwards the support of the weakest stored pattern.
    #[must_use]
    pub fn min_support(&self) -> usize {
        if self.is_full() {
            self.heap.peek().map_or(0, |Reverse(e)| e.0.support)
        } else {
            0
        }
    }

    /// Try to insert a pattern.
    ///
    /// Support-0 patterns are never admitted (closed itemsets below any
    /// useful support level would otherwise pad an unfilled heap). While
    /// the heap is not full every other pattern is accepted; once full the
    /// candidate must strictly outrank the weakest element, which it then
    /// displaces. An exact tie keeps the incumbent.
    pub fn insert(&mut self, fi: FrequentItemset) -> bool {
        if fi.support == 0 {
            return false;
        }
        let entry = TopKEntry(fi);
        if !self.is_full() {
            self.heap.push(Reverse(entry));
            return true;
        }
        let outranks = self
            .heap
            .peek()
            .is_some_and(|Reverse(weakest)| entry.eviction_cmp(weakest) == Ordering::Greater);
        if outranks {
            self.heap.pop();
            self.heap.push(Reverse(entry));
            true
        } else {
            false
        }
    }

    /// Drain the heap into a list sorted by support descending, probability
    /// descending, items ascending.
    #[must_use]
    pub fn drain_sorted(self) -> Vec<FrequentItemset> {
        let mut results: Vec<FrequentItemset> =
            self.heap.into_iter().map(|Reverse(e)| e.0).collect();
        results.sort_by(FrequentItemset::cmp_by_support);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemset::Itemset;

    fn fi(item: u32, support: usize, probability: f64) -> FrequentItemset {
        FrequentItemset::new(Itemset::single(item), support, probability)
    }

    #[test]
    fn threshold_is_zero_until_full() {
        let mut heap = TopKHeap::new(2);
        assert_eq!(heap.min_support(), 0);
        assert!(heap.insert(fi(0, 5, 0.9)));
        assert_eq!(heap.min_support(), 0);
        assert!(heap.insert(fi(1, 3, 0.8)));
        assert!(heap.is_full());
        assert_eq!(heap.min_support(), 3);
    }

    #[test]
    fn better_pattern_displaces_weakest() {
        let mut heap = TopKHeap::new(2);
        heap.insert(fi(0, 5, 0.9));
        heap.insert(fi(1, 3, 0.8));

        assert!(heap.insert(fi(2, 4, 0.5)));
        assert_eq!(heap.min_support(), 4);

        // Too weak now.
        assert!(!heap.insert(fi(3, 3, 0.99)));
    }

    #[test]
    fn probability_breaks_support_ties() {
        let mut heap = TopKHeap::new(1);
        heap.insert(fi(0, 4, 0.6));
        assert!(heap.insert(fi(1, 4, 0.8)));

        let results = heap.drain_sorted();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].itemset, Itemset::single(1));
    }

    #[test]
    fn exact_tie_keeps_incumbent() {
        let mut heap = TopKHeap::new(1);
        heap.insert(fi(2, 4, 0.6));
        // Same support and probability; item 1 sorts before item 2 in the
        // eviction key, so the candidate does not outrank the incumbent.
        assert!(!heap.insert(fi(1, 4, 0.6)));
        let results = heap.drain_sorted();
        assert_eq!(results[0].itemset, Itemset::single(2));
    }

    #[test]
    fn support_zero_rejected() {
        let mut heap = TopKHeap::new(3);
        assert!(!heap.insert(fi(0, 0, 1.0)));
        assert!(heap.is_empty());
        assert_eq!(heap.min_support(), 0);
    }

    #[test]
    fn drain_sorts_by_support_then_probability() {
        let mut heap = TopKHeap::new(4);
        heap.insert(fi(0, 2, 0.5));
        heap.insert(fi(1, 5, 0.7));
        heap.insert(fi(2, 5, 0.9));
        heap.insert(fi(3, 1, 1.0));

        let supports: Vec<(usize, u32)> = heap
            .drain_sorted()
            .iter()
            .map(|f| (f.support, f.itemset.items()[0]))
            .collect();
        assert_eq!(supports, vec![(5, 2), (5, 1), (2, 0), (1, 3)]);
    }
}
