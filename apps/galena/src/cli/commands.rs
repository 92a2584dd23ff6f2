//! # CLI Command Implementations
//!
//! The command handlers own all I/O: loading the database file, running the
//! miner, and printing tables, JSON, or CSV.

use crate::loader::load_database;
use galena_core::{
    DirectConvolutionCalculator, DivideAndConquerCalculator, FrequentItemset, GalenaError,
    MemoryDatabase, MinerBuilder, MiningOutcome, PruningProfile, SearchStrategy,
    SupportCalculator, Vocabulary,
};
use std::path::Path;

/// Resolve a strategy name from the command line.
fn parse_strategy(name: &str) -> Result<SearchStrategy, GalenaError> {
    match name {
        "best-first" | "best_first" | "bestfirst" => Ok(SearchStrategy::BestFirst),
        "dfs" => Ok(SearchStrategy::Dfs),
        "bfs" => Ok(SearchStrategy::Bfs),
        _ => Err(GalenaError::InvalidParameter(format!(
            "unknown strategy '{name}' (expected best-first, dfs, or bfs)"
        ))),
    }
}

/// Resolve a calculator name from the command line.
fn parse_calculator(
    name: &str,
    tau: f64,
) -> Result<Box<dyn SupportCalculator>, GalenaError> {
    match name {
        "direct" => Ok(Box::new(DirectConvolutionCalculator::new(tau)?)),
        "dnc" => Ok(Box::new(DivideAndConquerCalculator::new(tau)?)),
        _ => Err(GalenaError::InvalidParameter(format!(
            "unknown calculator '{name}' (expected direct or dnc)"
        ))),
    }
}

/// Render an itemset with vocabulary names.
fn named_itemset(fi: &FrequentItemset, vocab: &Vocabulary) -> String {
    let names: Vec<&str> = fi
        .itemset
        .iter()
        .map(|item| vocab.name(item).unwrap_or("?"))
        .collect();
    format!("{{{}}}", names.join(", "))
}

fn print_results(outcome: &MiningOutcome, vocab: &Vocabulary) {
    if outcome.itemsets.is_empty() {
        println!("no frequent closed itemsets");
        return;
    }
    println!("{:>4}  {:>8}  {:>10}  itemset", "rank", "support", "prob");
    for (rank, fi) in outcome.itemsets.iter().enumerate() {
        println!(
            "{:>4}  {:>8}  {:>10.6}  {}",
            rank + 1,
            fi.support,
            fi.probability,
            named_itemset(fi, vocab)
        );
    }
}

// =============================================================================
// MINE
// =============================================================================

/// Mine one database and print the top-k list.
pub fn cmd_mine(
    file: &Path,
    tau: f64,
    k: usize,
    strategy: &str,
    calculator: &str,
    json: bool,
) -> Result<(), GalenaError> {
    use galena_core::Database;

    let strategy = parse_strategy(strategy)?;
    let db = load_database(file)?;
    tracing::info!(
        transactions = db.size(),
        items = db.vocabulary().size(),
        %strategy,
        "mining {}",
        file.display()
    );

    let miner = MinerBuilder::new(&db, tau, k)
        .strategy(strategy)
        .calculator(parse_calculator(calculator, tau)?)
        .build()?;
    let outcome = miner.mine();

    if json {
        let payload = serde_json::json!({
            "tau": tau,
            "k": k,
            "strategy": strategy,
            "itemsets": outcome.itemsets,
            "metrics": outcome.metrics,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload)
                .map_err(|e| GalenaError::Io(e.to_string()))?
        );
        return Ok(());
    }

    print_results(&outcome, db.vocabulary());
    tracing::info!(
        phase1_ms = outcome.metrics.phase1.as_millis() as u64,
        phase2_ms = outcome.metrics.phase2.as_millis() as u64,
        phase3_ms = outcome.metrics.phase3.as_millis() as u64,
        explored = outcome.metrics.candidates_explored,
        cache = outcome.metrics.cache_size,
        "done"
    );
    Ok(())
}

// =============================================================================
// COMPARE
// =============================================================================

/// Run all three strategies on the same database and report the difference
/// in work; the result sets must be identical.
pub fn cmd_compare(file: &Path, tau: f64, k: usize, json: bool) -> Result<(), GalenaError> {
    let db = load_database(file)?;

    let strategies = [
        SearchStrategy::BestFirst,
        SearchStrategy::Dfs,
        SearchStrategy::Bfs,
    ];
    let outcomes: Vec<MiningOutcome> = strategies
        .iter()
        .map(|&strategy| {
            MinerBuilder::new(&db, tau, k)
                .strategy(strategy)
                .build()
                .map(|miner| miner.mine())
        })
        .collect::<Result<_, _>>()?;

    let reference: Vec<_> = outcomes[0]
        .itemsets
        .iter()
        .map(|fi| (fi.itemset.clone(), fi.support))
        .collect();
    for (strategy, outcome) in strategies.iter().zip(&outcomes) {
        let keys: Vec<_> = outcome
            .itemsets
            .iter()
            .map(|fi| (fi.itemset.clone(), fi.support))
            .collect();
        if keys != reference {
            return Err(GalenaError::InvalidData(format!(
                "strategy {strategy} diverged from best-first results"
            )));
        }
    }

    if json {
        let payload: Vec<_> = strategies
            .iter()
            .zip(&outcomes)
            .map(|(strategy, outcome)| {
                serde_json::json!({
                    "strategy": strategy,
                    "metrics": outcome.metrics,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&payload)
                .map_err(|e| GalenaError::Io(e.to_string()))?
        );
        return Ok(());
    }

    println!(
        "{:>12}  {:>9}  {:>9}  {:>9}  {:>10}  {:>9}",
        "strategy", "total_ms", "explored", "generated", "calcs", "frontier"
    );
    for (strategy, outcome) in strategies.iter().zip(&outcomes) {
        let m = &outcome.metrics;
        println!(
            "{:>12}  {:>9}  {:>9}  {:>9}  {:>10}  {:>9}",
            strategy.to_string(),
            m.total_time().as_millis(),
            m.candidates_explored,
            m.candidates_generated,
            m.support_calculations,
            m.max_frontier_len
        );
    }
    println!(
        "\nall strategies agree on {} itemsets",
        outcomes[0].itemsets.len()
    );
    Ok(())
}

// =============================================================================
// PRUNE
// =============================================================================

/// Run the incremental pruning ladder and report per-level metrics.
pub fn cmd_prune(
    file: &Path,
    tau: f64,
    k: usize,
    level: Option<u8>,
    csv: bool,
) -> Result<(), GalenaError> {
    use galena_core::MiningMetrics;

    let db = load_database(file)?;
    let levels: Vec<u8> = match level {
        Some(n) if n <= 7 => vec![n],
        Some(n) => {
            return Err(GalenaError::InvalidParameter(format!(
                "pruning level must be 0..=7, got {n}"
            )))
        }
        None => (0..=7).collect(),
    };

    if csv {
        println!("{}", MiningMetrics::csv_header());
    } else {
        println!(
            "{:>14}  {:>9}  {:>9}  {:>9}  {:>10}  {:>8}",
            "config", "total_ms", "explored", "pruned", "calcs", "patterns"
        );
    }

    let mut reference: Option<Vec<(galena_core::Itemset, usize)>> = None;
    for n in levels {
        let profile = PruningProfile::level(n);
        let outcome = MinerBuilder::new(&db, tau, k)
            .profile(profile)
            .build()?
            .mine();

        let keys: Vec<_> = outcome
            .itemsets
            .iter()
            .map(|fi| (fi.itemset.clone(), fi.support))
            .collect();
        match &reference {
            None => reference = Some(keys),
            Some(expected) if *expected != keys => {
                return Err(GalenaError::InvalidData(format!(
                    "profile {} diverged from the baseline result",
                    profile.name()
                )));
            }
            Some(_) => {}
        }

        let m = &outcome.metrics;
        if csv {
            println!("{}", m.csv_row(&profile.name(), profile.enabled_count()));
        } else {
            println!(
                "{:>14}  {:>9}  {:>9}  {:>9}  {:>10}  {:>8}",
                profile.name(),
                m.total_time().as_millis(),
                m.candidates_explored,
                m.total_pruned(),
                m.support_calculations,
                m.patterns_found
            );
        }
    }
    Ok(())
}

// =============================================================================
// STATS
// =============================================================================

/// Dataset summary: shape, item frequencies, probability range.
pub fn cmd_stats(file: &Path, json: bool) -> Result<(), GalenaError> {
    use galena_core::Database;

    let db: MemoryDatabase = load_database(file)?;
    let n = db.size();
    let v = db.vocabulary().size();

    let mut item_counts = vec![0usize; v];
    let mut prob_min = f64::INFINITY;
    let mut prob_max = f64::NEG_INFINITY;
    let mut entries = 0usize;
    for transaction in db.transactions() {
        for &(item, prob) in transaction {
            item_counts[item as usize] += 1;
            prob_min = prob_min.min(prob);
            prob_max = prob_max.max(prob);
            entries += 1;
        }
    }

    if json {
        let payload = serde_json::json!({
            "transactions": n,
            "items": v,
            "entries": entries,
            "avg_transaction_len": if n > 0 { entries as f64 / n as f64 } else { 0.0 },
            "prob_min": if entries > 0 { prob_min } else { 0.0 },
            "prob_max": if entries > 0 { prob_max } else { 0.0 },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload)
                .map_err(|e| GalenaError::Io(e.to_string()))?
        );
        return Ok(());
    }

    println!("transactions: {n}");
    println!("items:        {v}");
    println!("entries:      {entries}");
    if n > 0 {
        println!("avg length:   {:.2}", entries as f64 / n as f64);
    }
    if entries > 0 {
        println!("prob range:   [{prob_min:.3}, {prob_max:.3}]");
    }

    // Top items by occurrence count.
    let mut ranked: Vec<(usize, usize)> = item_counts.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("\nmost frequent items:");
    for (item, count) in ranked.into_iter().take(10) {
        let name = db.vocabulary().name(item as u32).unwrap_or("?");
        println!("{count:>8}  {name}");
    }
    Ok(())
}
