//! # Miner Factory
//!
//! Builder wiring a [`Miner`] from its collaborators. All parameter
//! validation happens here, before any mining is attempted: tau must lie in
//! (0, 1], k must be at least 1, and the database must not be empty.
//! Unconfigured parts get the production defaults: direct-convolution
//! calculator, best-first search, all pruning rules enabled.

use crate::database::Database;
use crate::frontier::SearchStrategy;
use crate::pipeline::Miner;
use crate::pruning::PruningProfile;
use crate::support::{DirectConvolutionCalculator, SupportCalculator};
use crate::types::GalenaError;

/// Builder for [`Miner`] instances.
pub struct MinerBuilder<'a> {
    database: &'a dyn Database,
    tau: f64,
    k: usize,
    strategy: SearchStrategy,
    profile: PruningProfile,
    calculator: Option<Box<dyn SupportCalculator>>,
}

impl<'a> MinerBuilder<'a> {
    /// Start a builder for the given database, threshold, and result count.
    #[must_use]
    pub fn new(database: &'a dyn Database, tau: f64, k: usize) -> Self {
        Self {
            database,
            tau,
            k,
            strategy: SearchStrategy::BestFirst,
            profile: PruningProfile::all(),
            calculator: None,
        }
    }

    /// Select the Phase 3 traversal strategy.
    #[must_use]
    pub fn strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Select the pruning profile (ablation experiments).
    #[must_use]
    pub fn profile(mut self, profile: PruningProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Supply a custom support calculator. It must have been constructed
    /// with the same tau passed to this builder.
    #[must_use]
    pub fn calculator(mut self, calculator: Box<dyn SupportCalculator>) -> Self {
        self.calculator = Some(calculator);
        self
    }

    /// Validate the configuration and build the miner.
    pub fn build(self) -> Result<Miner<'a>, GalenaError> {
        if !(self.tau > 0.0 && self.tau <= 1.0) {
            return Err(GalenaError::InvalidParameter(format!(
                "tau must be in (0, 1], got: {:.4}",
                self.tau
            )));
        }
        if self.k < 1 {
            return Err(GalenaError::InvalidParameter(
                "k must be at least 1".to_string(),
            ));
        }
        if self.database.size() == 0 {
            return Err(GalenaError::InvalidParameter(
                "database cannot be empty".to_string(),
            ));
        }

        let calculator = match self.calculator {
            Some(calculator) => calculator,
            None => Box::new(DirectConvolutionCalculator::new(self.tau)?),
        };

        Ok(Miner::from_parts(
            self.database,
            self.tau,
            self.k,
            calculator,
            self.strategy,
            self.profile,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDatabase;
    use crate::support::DivideAndConquerCalculator;

    fn db() -> MemoryDatabase {
        MemoryDatabase::from_named(vec![vec![("a", 0.9)]]).expect("database")
    }

    #[test]
    fn defaults_are_production_settings() {
        let db = db();
        let miner = MinerBuilder::new(&db, 0.5, 3).build().expect("miner");
        assert_eq!(miner.strategy(), SearchStrategy::BestFirst);
        assert_eq!(miner.profile(), PruningProfile::all());
        assert_eq!(miner.k(), 3);
    }

    #[test]
    fn invalid_tau_rejected() {
        let db = db();
        for tau in [0.0, -0.5, 1.2, f64::NAN] {
            let result = MinerBuilder::new(&db, tau, 3).build();
            assert!(
                matches!(result, Err(GalenaError::InvalidParameter(_))),
                "tau {tau}"
            );
        }
    }

    #[test]
    fn zero_k_rejected() {
        let db = db();
        let result = MinerBuilder::new(&db, 0.5, 0).build();
        assert!(matches!(result, Err(GalenaError::InvalidParameter(_))));
    }

    #[test]
    fn empty_database_rejected() {
        let db = MemoryDatabase::from_named(Vec::<Vec<(&str, f64)>>::new()).expect("database");
        let result = MinerBuilder::new(&db, 0.5, 3).build();
        assert!(matches!(result, Err(GalenaError::InvalidParameter(_))));
    }

    #[test]
    fn custom_calculator_and_strategy_accepted() {
        let db = db();
        let calculator = DivideAndConquerCalculator::new(0.5).expect("calculator");
        let miner = MinerBuilder::new(&db, 0.5, 2)
            .strategy(SearchStrategy::Dfs)
            .profile(PruningProfile::none())
            .calculator(Box::new(calculator))
            .build()
            .expect("miner");
        assert_eq!(miner.strategy(), SearchStrategy::Dfs);
        assert_eq!(miner.profile(), PruningProfile::none());
    }
}
