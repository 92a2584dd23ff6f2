//! # galena-core
//!
//! Deterministic top-k frequent closed itemset mining over uncertain
//! transaction databases. THE LOGIC.
//!
//! In an uncertain database every item of every transaction carries an
//! independent existence probability. The *probabilistic support* of an
//! itemset X under a threshold tau is the largest integer s such that
//! `P(sup(X) >= s) >= tau`, computed from the generating function of the
//! per-transaction Bernoulli trials. This crate mines the k closed itemsets
//! (no strict superset with equal support) of largest probabilistic
//! support, using a closure-aware enumeration with a dynamic threshold fed
//! back from a bounded top-k heap.
//!
//! ## Architectural Constraints
//!
//! - The core is closed: the only injection points are the [`Database`]
//!   trait, the [`SupportCalculator`] strategy, the [`SearchStrategy`], and
//!   the [`PruningProfile`].
//! - No global state: caches, heaps, and metrics are scoped to one run.
//! - No I/O and no async; the only parallelism is Phase 1's fan-out.
//! - Deterministic: identical inputs produce elementwise-identical output,
//!   for every strategy and every pruning profile.

// =============================================================================
// MODULES
// =============================================================================

pub mod cache;
mod closure;
pub mod database;
pub mod factory;
pub mod frontier;
pub mod itemset;
pub mod metrics;
pub mod pipeline;
pub mod pruning;
pub mod support;
pub mod tidset;
pub mod topk;
pub mod types;
pub mod vocab;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use cache::{CachedPattern, PatternCache};
pub use database::{Database, MemoryDatabase, Transaction};
pub use factory::MinerBuilder;
pub use frontier::SearchStrategy;
pub use itemset::{FrequentItemset, Itemset};
pub use metrics::MiningMetrics;
pub use pipeline::{Miner, MiningOutcome};
pub use pruning::PruningProfile;
pub use support::{
    DirectConvolutionCalculator, DivideAndConquerCalculator, SupportCalculator, SupportResult,
};
pub use tidset::{TidProb, Tidset};
pub use topk::TopKHeap;
pub use types::{GalenaError, ItemId, Tid, MIN_PROB};
pub use vocab::Vocabulary;
