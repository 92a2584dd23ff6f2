//! # Uncertain Database
//!
//! The `Database` trait is the engine's single external dependency: a fixed
//! collection of uncertain transactions plus a vocabulary. Each item of each
//! transaction carries an independent existence probability in (0, 1];
//! unlisted items have probability zero.
//!
//! [`MemoryDatabase`] is the in-memory implementation. It validates its
//! input once at construction and pre-builds a per-item inverted index so
//! singleton tidsets are O(1) to produce; multi-item tidsets are formed by
//! intersecting the per-item lists.

use crate::itemset::Itemset;
use crate::tidset::Tidset;
use crate::types::{GalenaError, ItemId, Tid};
use crate::vocab::Vocabulary;

/// One uncertain transaction: `(item, probability)` pairs.
///
/// Invariant: each item appears at most once; probabilities are in (0, 1].
pub type Transaction = Vec<(ItemId, f64)>;

// =============================================================================
// DATABASE TRAIT
// =============================================================================

/// Read-only view of an uncertain transaction database.
///
/// `Send + Sync` because Phase 1 of the pipeline queries singleton tidsets
/// from a worker pool. Implementations must be deterministic: the same
/// itemset always yields the same tidset.
pub trait Database: Send + Sync {
    /// Number of transactions (N).
    fn size(&self) -> usize;

    /// The item vocabulary.
    fn vocabulary(&self) -> &Vocabulary;

    /// Tidset of an itemset: every transaction in which all member items
    /// have a recorded probability, with the product of those probabilities.
    ///
    /// The empty itemset covers all transactions with probability 1.
    fn tidset(&self, itemset: &Itemset) -> Tidset;
}

// =============================================================================
// IN-MEMORY IMPLEMENTATION
// =============================================================================

/// In-memory uncertain database with a per-item inverted index.
#[derive(Debug, Clone)]
pub struct MemoryDatabase {
    vocab: Vocabulary,
    transactions: Vec<Transaction>,
    /// item id -> tidset of the singleton `{item}`.
    item_index: Vec<Tidset>,
}

impl MemoryDatabase {
    /// Build a database from id-based transactions.
    ///
    /// Validates that every item id is within the vocabulary, probabilities
    /// are in (0, 1], and no transaction lists an item twice.
    pub fn new(
        vocab: Vocabulary,
        transactions: Vec<Transaction>,
    ) -> Result<Self, GalenaError> {
        let vocab_size = vocab.size();
        let mut item_index = vec![Tidset::empty(); vocab_size];

        for (tid, transaction) in transactions.iter().enumerate() {
            let mut seen = vec![false; vocab_size];
            for &(item, prob) in transaction {
                if (item as usize) >= vocab_size {
                    return Err(GalenaError::InvalidData(format!(
                        "transaction {tid}: item id {item} outside vocabulary of size {vocab_size}"
                    )));
                }
                if !(prob > 0.0 && prob <= 1.0) {
                    return Err(GalenaError::InvalidData(format!(
                        "transaction {tid}: probability {prob} outside (0, 1]"
                    )));
                }
                if seen[item as usize] {
                    return Err(GalenaError::InvalidData(format!(
                        "transaction {tid}: item {item} listed twice"
                    )));
                }
                seen[item as usize] = true;
                item_index[item as usize].push(tid as Tid, prob);
            }
        }

        Ok(Self {
            vocab,
            transactions,
            item_index,
        })
    }

    /// Build a database from name-based transactions, interning item names
    /// in order of first appearance.
    pub fn from_named<S: AsRef<str>>(
        transactions: Vec<Vec<(S, f64)>>,
    ) -> Result<Self, GalenaError> {
        let mut vocab = Vocabulary::new();
        let rows: Vec<Transaction> = transactions
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(name, prob)| (vocab.intern(name.as_ref()), prob))
                    .collect()
            })
            .collect();
        Self::new(vocab, rows)
    }

    /// The raw transactions.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

impl Database for MemoryDatabase {
    fn size(&self) -> usize {
        self.transactions.len()
    }

    fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    fn tidset(&self, itemset: &Itemset) -> Tidset {
        let mut items = itemset.iter();
        let Some(first) = items.next() else {
            return Tidset::full(self.size());
        };
        let mut result = self.item_index[first as usize].clone();
        for item in items {
            if result.is_empty() {
                break;
            }
            result = result.intersect(&self.item_index[item as usize]);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryDatabase {
        MemoryDatabase::from_named(vec![
            vec![("a", 0.5), ("b", 0.5)],
            vec![("a", 0.5)],
            vec![("a", 0.5)],
        ])
        .expect("database")
    }

    #[test]
    fn singleton_tidset_uses_inverted_index() {
        let db = sample();
        let a = db.vocab.id("a").expect("a");
        let tidset = db.tidset(&Itemset::single(a));
        assert_eq!(tidset.len(), 3);
        assert!(tidset.iter().all(|e| e.prob == 0.5));
    }

    #[test]
    fn multi_item_tidset_multiplies_probabilities() {
        let db = sample();
        let a = db.vocab.id("a").expect("a");
        let b = db.vocab.id("b").expect("b");
        let tidset = db.tidset(&Itemset::pair(a, b));
        assert_eq!(tidset.len(), 1);
        assert_eq!(tidset.entries()[0].tid, 0);
        assert!((tidset.entries()[0].prob - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_itemset_covers_everything() {
        let db = sample();
        let tidset = db.tidset(&Itemset::empty());
        assert_eq!(tidset.len(), 3);
        assert!(tidset.iter().all(|e| e.prob == 1.0));
    }

    #[test]
    fn absent_item_pair_yields_empty_tidset() {
        let db = MemoryDatabase::from_named(vec![
            vec![("a", 1.0)],
            vec![("b", 1.0)],
        ])
        .expect("database");
        let tidset = db.tidset(&Itemset::pair(0, 1));
        assert!(tidset.is_empty());
    }

    #[test]
    fn invalid_probability_rejected() {
        let result = MemoryDatabase::from_named(vec![vec![("a", 0.0)]]);
        assert!(matches!(result, Err(GalenaError::InvalidData(_))));

        let result = MemoryDatabase::from_named(vec![vec![("a", 1.01)]]);
        assert!(matches!(result, Err(GalenaError::InvalidData(_))));
    }

    #[test]
    fn duplicate_item_in_transaction_rejected() {
        let vocab = Vocabulary::from_names(["a"]).expect("vocab");
        let result = MemoryDatabase::new(vocab, vec![vec![(0, 0.5), (0, 0.7)]]);
        assert!(matches!(result, Err(GalenaError::InvalidData(_))));
    }

    #[test]
    fn out_of_vocabulary_item_rejected() {
        let vocab = Vocabulary::from_names(["a"]).expect("vocab");
        let result = MemoryDatabase::new(vocab, vec![vec![(3, 0.5)]]);
        assert!(matches!(result, Err(GalenaError::InvalidData(_))));
    }
}
