//! # Mining Pipeline
//!
//! The fixed three-phase skeleton shared by every search strategy:
//!
//! 1. **Phase 1**: compute support for every singleton, in parallel, and
//!    populate the pattern cache. No filtering: the threshold is derived
//!    dynamically in Phase 2.
//! 2. **Phase 2**: walk the singletons in descending-support order,
//!    insert the closed ones into the top-k heap (raising the dynamic
//!    threshold), build the frequent-item array, and seed the frontier
//!    with the 2-itemsets cached as a side effect of closure checking.
//! 3. **Phase 3**: drain the frontier, check closure, update the top-k
//!    heap, push surviving extensions.
//!
//! All mutable state lives in a [`MiningRun`] constructed at the start of
//! `mine()` and dropped when it returns, so a `Miner` can be reused but a
//! single run is never reentrant. Only the Phase 1 fan-out is parallel;
//! Phases 2 and 3 depend on the threshold rising monotonically and stay on
//! one thread.

use crate::cache::{CachedPattern, PatternCache};
use crate::database::Database;
use crate::frontier::{Frontier, SearchStrategy};
use crate::itemset::{FrequentItemset, Itemset};
use crate::metrics::MiningMetrics;
use crate::pruning::PruningProfile;
use crate::support::SupportCalculator;
use crate::topk::TopKHeap;
use crate::types::ItemId;
use rayon::prelude::*;
use std::time::Instant;

// =============================================================================
// MINER
// =============================================================================

/// Result of one mining run: the top-k closed itemsets sorted by
/// (support desc, probability desc), plus the run's metrics.
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub itemsets: Vec<FrequentItemset>,
    pub metrics: MiningMetrics,
}

/// A configured mining pipeline.
///
/// Construction validates all parameters (see [`MinerBuilder`]); `mine()`
/// itself is infallible and deterministic.
///
/// [`MinerBuilder`]: crate::factory::MinerBuilder
pub struct Miner<'a> {
    database: &'a dyn Database,
    tau: f64,
    k: usize,
    calculator: Box<dyn SupportCalculator>,
    strategy: SearchStrategy,
    profile: PruningProfile,
}

impl<'a> Miner<'a> {
    /// Build a miner with the default configuration: direct-convolution
    /// calculator, best-first search, all pruning rules enabled.
    pub fn new(
        database: &'a dyn Database,
        tau: f64,
        k: usize,
    ) -> Result<Self, crate::types::GalenaError> {
        crate::factory::MinerBuilder::new(database, tau, k).build()
    }

    pub(crate) fn from_parts(
        database: &'a dyn Database,
        tau: f64,
        k: usize,
        calculator: Box<dyn SupportCalculator>,
        strategy: SearchStrategy,
        profile: PruningProfile,
    ) -> Self {
        Self {
            database,
            tau,
            k,
            calculator,
            strategy,
            profile,
        }
    }

    /// The probability threshold tau.
    #[must_use]
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// The number of patterns to mine.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The Phase 3 traversal strategy.
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// The pruning profile in effect.
    #[must_use]
    pub fn profile(&self) -> PruningProfile {
        self.profile
    }

    /// Mine the top-k frequent closed itemsets.
    #[must_use]
    pub fn mine(&self) -> MiningOutcome {
        let mut run = MiningRun::new(self);

        let start = Instant::now();
        let singletons = run.phase_one();
        run.metrics.phase1 = start.elapsed();

        let start = Instant::now();
        let seeds = run.phase_two(&singletons);
        let mut frontier = Frontier::with_seeds(self.strategy, seeds);
        run.metrics.phase2 = start.elapsed();

        let start = Instant::now();
        run.phase_three(&mut frontier);
        run.metrics.phase3 = start.elapsed();

        run.finish()
    }
}

// =============================================================================
// PER-RUN STATE
// =============================================================================

/// Mutable state of one mining run. Created by `mine()`, dropped with it.
pub(crate) struct MiningRun<'m> {
    pub(crate) database: &'m dyn Database,
    pub(crate) calculator: &'m dyn SupportCalculator,
    pub(crate) profile: PruningProfile,
    pub(crate) topk: TopKHeap,
    pub(crate) cache: PatternCache,
    /// Pre-built singleton itemsets, indexed by item id, so unions and
    /// cache lookups do not re-allocate.
    pub(crate) singletons: Vec<Itemset>,
    /// Item ids passing the dynamic minimum support, support descending.
    pub(crate) frequent_items: Vec<ItemId>,
    pub(crate) metrics: MiningMetrics,
}

impl<'m> MiningRun<'m> {
    fn new(miner: &'m Miner<'_>) -> Self {
        let vocab_size = miner.database.vocabulary().size();
        Self {
            database: miner.database,
            calculator: miner.calculator.as_ref(),
            profile: miner.profile,
            topk: TopKHeap::new(miner.k),
            cache: PatternCache::with_capacity(vocab_size),
            singletons: Vec::new(),
            frequent_items: Vec::new(),
            metrics: MiningMetrics::default(),
        }
    }

    /// Phase 1: singleton supports for the whole vocabulary, in parallel.
    ///
    /// Returns the non-empty singletons sorted by (support desc,
    /// probability desc, item asc). Worker results are merged into the
    /// run-local cache on the mining thread.
    fn phase_one(&mut self) -> Vec<FrequentItemset> {
        let vocab_size = self.database.vocabulary().size();
        self.singletons = (0..vocab_size as ItemId).map(Itemset::single).collect();

        let database = self.database;
        let calculator = self.calculator;
        let singletons = &self.singletons;

        let computed: Vec<Option<(FrequentItemset, CachedPattern)>> = (0..vocab_size)
            .into_par_iter()
            .map(|item| {
                let singleton = &singletons[item];
                let tidset = database.tidset(singleton);
                if tidset.is_empty() {
                    return None;
                }
                let result = calculator.support_from_tidset(&tidset);
                Some((
                    FrequentItemset::new(singleton.clone(), result.support, result.probability),
                    CachedPattern::new(result.support, result.probability, tidset),
                ))
            })
            .collect();

        let mut result = Vec::with_capacity(vocab_size);
        for entry in computed.into_iter().flatten() {
            let (fi, cached) = entry;
            self.metrics.support_calculations += 1;
            self.cache.insert(fi.itemset.clone(), cached);
            result.push(fi);
        }
        result.sort_by(FrequentItemset::cmp_by_support);
        result
    }

    /// Phase 2: fill the top-k heap with closed singletons and collect the
    /// 2-itemset frontier seeds.
    fn phase_two(&mut self, singletons: &[FrequentItemset]) -> Vec<FrequentItemset> {
        let mut minsup = 0usize;
        let mut processed = 0usize;

        for (i, fi) in singletons.iter().enumerate() {
            // P1a: sorted order means no later singleton (or superset of
            // one, by anti-monotonicity) can enter the heap.
            if self.profile.p1 && self.topk.is_full() && fi.support < minsup {
                self.metrics.pruned_by_p1 += (singletons.len() - i) as u64;
                break;
            }
            processed += 1;

            let closed = self.check_closure_singleton(fi, singletons, minsup);
            self.metrics.closure_checks += 1;

            if closed && self.topk.insert(fi.clone()) && self.topk.is_full() {
                minsup = self.topk.min_support();
            }
        }

        // Only items meeting the derived threshold can extend candidates
        // in Phase 3; keep them in descending-support order.
        self.frequent_items = singletons[..processed]
            .iter()
            .filter(|fi| fi.support >= minsup)
            .map(|fi| fi.itemset.items()[0])
            .collect();

        // Seed the frontier with the 2-itemsets cached during closure
        // checking. P1c: skip those already below the threshold.
        let mut seeds = Vec::new();
        let mut pruned = 0u64;
        for (itemset, cached) in self.cache.iter() {
            if itemset.len() != 2 {
                continue;
            }
            if self.profile.p1 && cached.support < minsup {
                pruned += 1;
                continue;
            }
            seeds.push(cached.to_frequent(itemset.clone()));
        }
        self.metrics.pruned_by_p1 += pruned;
        self.metrics.candidates_generated += seeds.len() as u64;
        seeds
    }

    /// Phase 3: drain the frontier, checking closure and growing it with
    /// surviving extensions.
    fn phase_three(&mut self, frontier: &mut Frontier) {
        let strategy = frontier.strategy();
        self.metrics.max_frontier_len = frontier.len();

        while let Some(candidate) = frontier.pop() {
            self.metrics.candidates_explored += 1;
            if strategy == SearchStrategy::Bfs {
                *self
                    .metrics
                    .candidates_per_level
                    .entry(candidate.itemset.len())
                    .or_insert(0) += 1;
            }

            let threshold = self.topk.min_support();
            if candidate.support < threshold {
                // P2b: in best-first order everything still queued is at
                // most as good, so the whole search can stop.
                if strategy == SearchStrategy::BestFirst && self.profile.p2 {
                    self.metrics.pruned_by_p2 += frontier.len() as u64 + 1;
                    break;
                }
                // P2a: the stack/queue holds mixed supports; only this
                // candidate can be skipped.
                self.metrics.pruned_by_p2 += 1;
                continue;
            }

            let outcome = self.check_closure_and_extend(&candidate, threshold);
            if outcome.is_closed {
                self.topk.insert(candidate);
            }

            // P2c: re-read the threshold (an insert may have raised it)
            // and drop extensions that can no longer enter.
            let threshold = self.topk.min_support();
            let mut kept = Vec::with_capacity(outcome.extensions.len());
            for ext in outcome.extensions {
                self.metrics.candidates_generated += 1;
                if self.profile.p2 && ext.support < threshold {
                    self.metrics.pruned_by_p2 += 1;
                    continue;
                }
                kept.push(ext);
            }
            frontier.extend(kept);
            self.metrics.max_frontier_len = self.metrics.max_frontier_len.max(frontier.len());
        }
    }

    /// Support of the singleton `{item}` from the Phase 1 cache.
    pub(crate) fn item_support(&self, item: ItemId) -> usize {
        self.singletons
            .get(item as usize)
            .and_then(|singleton| self.cache.get(singleton))
            .map_or(0, |cached| cached.support)
    }

    fn finish(mut self) -> MiningOutcome {
        self.metrics.cache_size = self.cache.len() as u64;
        let itemsets = self.topk.drain_sorted();
        self.metrics.patterns_found = itemsets.len();
        MiningOutcome {
            itemsets,
            metrics: self.metrics,
        }
    }
}
