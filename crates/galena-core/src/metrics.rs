//! # Mining Metrics
//!
//! Per-run counters and phase timings. All metrics are instance-scoped to
//! one mining run (no global state) and are reported alongside the result
//! list, which is what the strategy-comparison and pruning-ablation
//! experiments consume.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters and timings collected during one mining run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningMetrics {
    /// Wall-clock time of Phase 1 (parallel singleton supports).
    pub phase1: Duration,
    /// Wall-clock time of Phase 2 (top-k seeding and frontier setup).
    pub phase2: Duration,
    /// Wall-clock time of Phase 3 (frontier drain).
    pub phase3: Duration,

    /// Candidates produced (2-itemset seeds plus generated extensions).
    pub candidates_generated: u64,
    /// Candidates popped from the frontier.
    pub candidates_explored: u64,

    /// Work avoided per pruning rule P1..P7.
    pub pruned_by_p1: u64,
    pub pruned_by_p2: u64,
    pub pruned_by_p3: u64,
    pub pruned_by_p4: u64,
    pub pruned_by_p5: u64,
    pub pruned_by_p6: u64,
    pub pruned_by_p7: u64,

    /// Generating-function evaluations.
    pub support_calculations: u64,
    /// Closure checks performed (singletons plus extension tests).
    pub closure_checks: u64,
    /// Tidset intersections performed.
    pub tidset_intersections: u64,

    /// Pattern-cache statistics.
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_size: u64,

    /// Patterns in the final result.
    pub patterns_found: usize,

    /// Largest frontier size observed (memory proxy; BFS reporting).
    pub max_frontier_len: usize,
    /// Candidates explored per itemset size (BFS level reporting).
    pub candidates_per_level: BTreeMap<usize, u64>,
}

impl MiningMetrics {
    /// Total work avoided across all pruning rules.
    #[must_use]
    pub fn total_pruned(&self) -> u64 {
        self.pruned_by_p1
            + self.pruned_by_p2
            + self.pruned_by_p3
            + self.pruned_by_p4
            + self.pruned_by_p5
            + self.pruned_by_p6
            + self.pruned_by_p7
    }

    /// Total wall-clock time across the three phases.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        self.phase1 + self.phase2 + self.phase3
    }

    /// Header for the experiment CSV format.
    #[must_use]
    pub fn csv_header() -> &'static str {
        "config,level,total_ms,phase1_ms,phase2_ms,phase3_ms,\
         generated,explored,total_pruned,p1,p2,p3,p4,p5,p6,p7,\
         support_calcs,closure_checks,intersections,\
         cache_hits,cache_misses,cache_size,patterns"
    }

    /// One experiment CSV row for this run.
    #[must_use]
    pub fn csv_row(&self, config: &str, level: usize) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            config,
            level,
            self.total_time().as_millis(),
            self.phase1.as_millis(),
            self.phase2.as_millis(),
            self.phase3.as_millis(),
            self.candidates_generated,
            self.candidates_explored,
            self.total_pruned(),
            self.pruned_by_p1,
            self.pruned_by_p2,
            self.pruned_by_p3,
            self.pruned_by_p4,
            self.pruned_by_p5,
            self.pruned_by_p6,
            self.pruned_by_p7,
            self.support_calculations,
            self.closure_checks,
            self.tidset_intersections,
            self.cache_hits,
            self.cache_misses,
            self.cache_size,
            self.patterns_found,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pruned_sums_all_rules() {
        let metrics = MiningMetrics {
            pruned_by_p1: 1,
            pruned_by_p3: 2,
            pruned_by_p7: 4,
            ..Default::default()
        };
        assert_eq!(metrics.total_pruned(), 7);
    }

    #[test]
    fn csv_row_field_count_matches_header() {
        let metrics = MiningMetrics::default();
        let row = metrics.csv_row("ALL", 7);
        let header_fields = MiningMetrics::csv_header()
            .split(',')
            .count();
        assert_eq!(row.split(',').count(), header_fields);
    }
}
