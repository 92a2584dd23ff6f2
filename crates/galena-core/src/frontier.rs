//! # Search Frontier
//!
//! Pluggable candidate store for Phase 3. The three strategies share all
//! closure and pruning machinery and must produce identical result sets;
//! they differ only in the order candidates are drained:
//!
//! - **Best-first**: priority queue by (support desc, size asc, probability
//!   desc). The only strategy where a sub-threshold pop proves every
//!   remaining candidate is also sub-threshold, enabling early termination.
//! - **DFS**: stack. Seeds and extension batches are pushed in ascending
//!   support order so the highest-support candidate is on top.
//! - **BFS**: queue. Seeds are enqueued in descending support order so the
//!   strongest candidates of a level run first.

use crate::itemset::FrequentItemset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;

// =============================================================================
// STRATEGY SELECTION
// =============================================================================

/// Phase 3 traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Priority-queue best-first search (production default).
    BestFirst,
    /// Depth-first search over a stack.
    Dfs,
    /// Breadth-first search over a queue.
    Bfs,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BestFirst => "best-first",
            Self::Dfs => "dfs",
            Self::Bfs => "bfs",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// BEST-FIRST ORDERING
// =============================================================================

/// Max-heap entry: greater means explored earlier. Support descending,
/// size ascending, probability descending, items ascending. Total, so the
/// drain order is deterministic regardless of insertion order.
#[derive(Debug, Clone)]
struct BestFirstEntry(FrequentItemset);

impl BestFirstEntry {
    fn priority_cmp(&self, other: &Self) -> Ordering {
        self.0
            .support
            .cmp(&other.0.support)
            .then_with(|| other.0.itemset.len().cmp(&self.0.itemset.len()))
            .then_with(|| self.0.probability.total_cmp(&other.0.probability))
            .then_with(|| other.0.itemset.cmp(&self.0.itemset))
    }
}

impl PartialEq for BestFirstEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority_cmp(other) == Ordering::Equal
    }
}

impl Eq for BestFirstEntry {}

impl PartialOrd for BestFirstEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BestFirstEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority_cmp(other)
    }
}

// =============================================================================
// FRONTIER
// =============================================================================

/// Candidate store backing Phase 3, tagged by strategy.
#[derive(Debug)]
pub(crate) enum Frontier {
    BestFirst(BinaryHeap<BestFirstEntry>),
    Dfs(Vec<FrequentItemset>),
    Bfs(VecDeque<FrequentItemset>),
}

impl Frontier {
    /// Build a frontier seeded with the Phase 2 candidates, ordered so that
    /// higher-support candidates are drained earlier within the first
    /// level: ascending push order for the stack, descending enqueue order
    /// for the queue, irrelevant for the priority queue.
    pub(crate) fn with_seeds(strategy: SearchStrategy, mut seeds: Vec<FrequentItemset>) -> Self {
        match strategy {
            SearchStrategy::BestFirst => {
                Self::BestFirst(seeds.into_iter().map(BestFirstEntry).collect())
            }
            SearchStrategy::Dfs => {
                seeds.sort_by(|a, b| b.cmp_by_support(a));
                Self::Dfs(seeds)
            }
            SearchStrategy::Bfs => {
                seeds.sort_by(FrequentItemset::cmp_by_support);
                Self::Bfs(seeds.into())
            }
        }
    }

    /// The strategy this frontier implements.
    pub(crate) fn strategy(&self) -> SearchStrategy {
        match self {
            Self::BestFirst(_) => SearchStrategy::BestFirst,
            Self::Dfs(_) => SearchStrategy::Dfs,
            Self::Bfs(_) => SearchStrategy::Bfs,
        }
    }

    /// Remaining candidate count.
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::BestFirst(heap) => heap.len(),
            Self::Dfs(stack) => stack.len(),
            Self::Bfs(queue) => queue.len(),
        }
    }

    /// Pop the next candidate per strategy order.
    pub(crate) fn pop(&mut self) -> Option<FrequentItemset> {
        match self {
            Self::BestFirst(heap) => heap.pop().map(|entry| entry.0),
            Self::Dfs(stack) => stack.pop(),
            Self::Bfs(queue) => queue.pop_front(),
        }
    }

    /// Add a batch of extensions. The DFS stack receives them in ascending
    /// support order so the strongest extension is explored first.
    pub(crate) fn extend(&mut self, mut extensions: Vec<FrequentItemset>) {
        match self {
            Self::BestFirst(heap) => heap.extend(extensions.into_iter().map(BestFirstEntry)),
            Self::Dfs(stack) => {
                extensions.sort_by(|a, b| b.cmp_by_support(a));
                stack.append(&mut extensions);
            }
            Self::Bfs(queue) => queue.extend(extensions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itemset::Itemset;

    fn fi(items: &[u32], support: usize) -> FrequentItemset {
        FrequentItemset::new(Itemset::from_items(items.to_vec()), support, 0.5)
    }

    fn seeds() -> Vec<FrequentItemset> {
        vec![fi(&[0, 1], 3), fi(&[0, 2], 7), fi(&[1, 2], 5)]
    }

    fn drain(frontier: &mut Frontier) -> Vec<usize> {
        let mut supports = Vec::new();
        while let Some(candidate) = frontier.pop() {
            supports.push(candidate.support);
        }
        supports
    }

    #[test]
    fn best_first_pops_highest_support() {
        let mut frontier = Frontier::with_seeds(SearchStrategy::BestFirst, seeds());
        assert_eq!(drain(&mut frontier), vec![7, 5, 3]);
    }

    #[test]
    fn best_first_prefers_smaller_itemsets_on_ties() {
        let mut frontier = Frontier::with_seeds(
            SearchStrategy::BestFirst,
            vec![fi(&[0, 1, 2], 5), fi(&[3, 4], 5)],
        );
        let first = frontier.pop().expect("candidate");
        assert_eq!(first.itemset.len(), 2);
    }

    #[test]
    fn dfs_has_highest_support_on_top_of_stack() {
        let mut frontier = Frontier::with_seeds(SearchStrategy::Dfs, seeds());
        assert_eq!(frontier.pop().expect("top").support, 7);

        // Freshly pushed extensions are explored before older candidates.
        frontier.extend(vec![fi(&[0, 2, 3], 4), fi(&[0, 2, 4], 6)]);
        assert_eq!(drain(&mut frontier), vec![6, 4, 5, 3]);
    }

    #[test]
    fn bfs_drains_level_in_descending_support() {
        let mut frontier = Frontier::with_seeds(SearchStrategy::Bfs, seeds());

        // Extensions go to the back of the queue, behind the other seeds.
        let first = frontier.pop().expect("front");
        assert_eq!(first.support, 7);
        frontier.extend(vec![fi(&[0, 2, 3], 9)]);
        assert_eq!(drain(&mut frontier), vec![5, 3, 9]);
    }

    #[test]
    fn len_tracks_contents() {
        let mut frontier = Frontier::with_seeds(SearchStrategy::Bfs, seeds());
        assert_eq!(frontier.len(), 3);
        frontier.pop();
        assert_eq!(frontier.len(), 2);
    }
}
