//! # Property-Based Tests
//!
//! Invariant verification against a brute-force oracle on small random
//! databases.
//!
//! Probabilities are drawn from a dyadic set (0.25, 0.5, 0.75, 1.0) so that
//! every product and partial sum the engine computes is exact in f64: the
//! oracle, every strategy, and every pruning profile then agree bit for
//! bit, and the equality assertions below are meaningful.

use galena_core::{
    Database, DirectConvolutionCalculator, FrequentItemset, Itemset, MemoryDatabase, MinerBuilder,
    PruningProfile, SearchStrategy, SupportCalculator, Vocabulary,
};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeMap;

// =============================================================================
// GENERATORS
// =============================================================================

/// Random uncertain database: up to 5 items, up to 10 transactions,
/// dyadic probabilities.
fn db_strategy() -> impl Strategy<Value = MemoryDatabase> {
    (1usize..=5).prop_flat_map(|v| {
        let row = vec(
            ((0..v as u32), prop::sample::select(vec![0.25, 0.5, 0.75, 1.0])),
            0..=v,
        );
        vec(row, 1..=10).prop_map(move |rows| {
            let vocab =
                Vocabulary::from_names((0..v).map(|i| format!("i{i}"))).expect("vocab");
            let transactions = rows
                .into_iter()
                .map(|row| {
                    // Deduplicate items drawn twice for the same transaction.
                    let mut unique = BTreeMap::new();
                    for (item, prob) in row {
                        unique.entry(item).or_insert(prob);
                    }
                    unique.into_iter().collect()
                })
                .collect();
            MemoryDatabase::new(vocab, transactions).expect("database")
        })
    })
}

fn tau_strategy() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.25, 0.5, 0.75, 1.0])
}

// =============================================================================
// ORACLE
// =============================================================================

/// Exhaustive reference implementation: enumerate every non-empty itemset,
/// compute its support directly, keep the closed ones with support >= 1,
/// and pick the k greatest under the engine's total order.
fn oracle_top_k(db: &MemoryDatabase, tau: f64, k: usize) -> Vec<FrequentItemset> {
    let calc = DirectConvolutionCalculator::new(tau).expect("calculator");
    let v = db.vocabulary().size();

    let all: Vec<FrequentItemset> = (1u32..(1 << v))
        .map(|mask| {
            let itemset = Itemset::from_items(
                (0..v as u32).filter(|i| mask & (1 << i) != 0).collect(),
            );
            let result = calc.support_from_tidset(&db.tidset(&itemset));
            FrequentItemset::new(itemset, result.support, result.probability)
        })
        .collect();

    let is_strict_superset = |y: &FrequentItemset, x: &FrequentItemset| {
        y.itemset.len() > x.itemset.len() && x.itemset.iter().all(|i| y.itemset.contains(i))
    };

    let mut closed: Vec<FrequentItemset> = all
        .iter()
        .filter(|x| {
            x.support >= 1
                && !all
                    .iter()
                    .any(|y| y.support == x.support && is_strict_superset(y, x))
        })
        .cloned()
        .collect();

    // Greatest k under (support, probability, itemset), the same total
    // order the top-k heap evicts by.
    closed.sort_by(|a, b| {
        b.support
            .cmp(&a.support)
            .then_with(|| b.probability.total_cmp(&a.probability))
            .then_with(|| b.itemset.cmp(&a.itemset))
    });
    closed.truncate(k);
    closed.sort_by(FrequentItemset::cmp_by_support);
    closed
}

fn mine(
    db: &MemoryDatabase,
    tau: f64,
    k: usize,
    strategy: SearchStrategy,
    profile: PruningProfile,
) -> Vec<FrequentItemset> {
    MinerBuilder::new(db, tau, k)
        .strategy(strategy)
        .profile(profile)
        .build()
        .expect("miner")
        .mine()
        .itemsets
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    /// The mined list equals the oracle: right length (min of k and the
    /// number of closed itemsets with support >= 1), right members, right
    /// order, exact supports and probabilities.
    #[test]
    fn result_matches_brute_force_oracle(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..6,
    ) {
        let expected = oracle_top_k(&db, tau, k);
        let mined = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());

        prop_assert_eq!(&mined, &expected);
    }

    /// No reported itemset has a strict superset of equal support, and the
    /// reported support is what the calculator yields on its tidset.
    #[test]
    fn results_are_closed_with_exact_supports(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..6,
    ) {
        let calc = DirectConvolutionCalculator::new(tau).expect("calculator");
        let mined = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());
        let v = db.vocabulary().size() as u32;

        for fi in &mined {
            let direct = calc.support_from_tidset(&db.tidset(&fi.itemset));
            prop_assert_eq!(fi.support, direct.support);
            prop_assert_eq!(fi.probability, direct.probability);
            prop_assert!(fi.support >= 1);

            // Every one-item extension must have strictly smaller support.
            for item in 0..v {
                if fi.itemset.contains(item) {
                    continue;
                }
                let superset = fi.itemset.with_item(item);
                let sup = calc.support_from_tidset(&db.tidset(&superset)).support;
                prop_assert!(
                    sup < fi.support,
                    "{} absorbed by {}",
                    fi.itemset,
                    superset
                );
            }
        }
    }

    /// The three frontier strategies yield elementwise-identical results.
    #[test]
    fn strategies_are_equivalent(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..6,
    ) {
        let best = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());
        let dfs = mine(&db, tau, k, SearchStrategy::Dfs, PruningProfile::all());
        let bfs = mine(&db, tau, k, SearchStrategy::Bfs, PruningProfile::all());

        prop_assert_eq!(&best, &dfs);
        prop_assert_eq!(&best, &bfs);
    }

    /// Any pruning-profile subset produces the same output as any other,
    /// under every strategy.
    #[test]
    fn pruning_profiles_are_equivalent(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..6,
        mask in 0u8..128,
    ) {
        for strategy in [SearchStrategy::BestFirst, SearchStrategy::Dfs, SearchStrategy::Bfs] {
            let full = mine(&db, tau, k, strategy, PruningProfile::all());
            let none = mine(&db, tau, k, strategy, PruningProfile::none());
            let sampled = mine(&db, tau, k, strategy, PruningProfile::from_bits(mask));

            prop_assert_eq!(&full, &none);
            prop_assert_eq!(&full, &sampled);
        }
    }

    /// Mining twice is elementwise idempotent.
    #[test]
    fn mining_twice_is_identical(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..6,
    ) {
        let first = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());
        let second = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());
        prop_assert_eq!(first, second);
    }

    /// Sort order of the output: support descending, then probability
    /// descending.
    #[test]
    fn results_are_sorted(
        db in db_strategy(),
        tau in tau_strategy(),
        k in 1usize..8,
    ) {
        let mined = mine(&db, tau, k, SearchStrategy::BestFirst, PruningProfile::all());
        for window in mined.windows(2) {
            let (a, b) = (&window[0], &window[1]);
            prop_assert!(
                a.support > b.support
                    || (a.support == b.support && a.probability >= b.probability)
            );
        }
        prop_assert!(mined.len() <= k);
    }
}
