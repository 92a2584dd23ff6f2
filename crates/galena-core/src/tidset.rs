//! # Tidset
//!
//! Sparse representation of the transactions in which an itemset can occur.
//!
//! A tidset is an ordered sequence of `(tid, prob)` entries with strictly
//! ascending tids; transactions not listed have probability zero. The
//! probability attached to a tid is the product of the member items'
//! existence probabilities in that transaction.
//!
//! Intersection is a linear merge over the two sorted entry lists: a tid
//! survives iff it appears in both inputs, with the product of the two
//! probabilities.

use crate::types::{GalenaError, Tid};
use serde::{Deserialize, Serialize};

/// One `(transaction id, probability)` entry of a [`Tidset`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TidProb {
    /// Transaction id in `[0, N)`.
    pub tid: Tid,
    /// Probability of the itemset occurring in this transaction, in (0, 1].
    pub prob: f64,
}

/// Sparse list of transactions with occurrence probabilities.
///
/// Invariants: tids strictly ascending, probabilities in (0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tidset {
    entries: Vec<TidProb>,
}

impl Tidset {
    /// Create an empty tidset.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a tidset from entries, validating the invariants.
    ///
    /// Returns `InvalidData` if a probability falls outside (0, 1] or the
    /// tids are not strictly ascending.
    pub fn new(entries: Vec<TidProb>) -> Result<Self, GalenaError> {
        let mut prev: Option<Tid> = None;
        for entry in &entries {
            if !(entry.prob > 0.0 && entry.prob <= 1.0) {
                return Err(GalenaError::InvalidData(format!(
                    "tidset probability {} at tid {} outside (0, 1]",
                    entry.prob, entry.tid
                )));
            }
            if let Some(p) = prev {
                if entry.tid <= p {
                    return Err(GalenaError::InvalidData(format!(
                        "tidset tids not strictly ascending: {} after {}",
                        entry.tid, p
                    )));
                }
            }
            prev = Some(entry.tid);
        }
        Ok(Self { entries })
    }

    /// Tidset covering all `n` transactions with probability 1.
    ///
    /// This is the tidset of the empty itemset.
    #[must_use]
    pub fn full(n: usize) -> Self {
        Self {
            entries: (0..n as Tid).map(|tid| TidProb { tid, prob: 1.0 }).collect(),
        }
    }

    /// Number of transactions in the tidset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no transaction can contain the itemset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in ascending tid order.
    pub fn iter(&self) -> impl Iterator<Item = &TidProb> {
        self.entries.iter()
    }

    /// The entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[TidProb] {
        &self.entries
    }

    /// Collect the probability values (for the dense calculator entry point).
    #[must_use]
    pub fn probabilities(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.prob).collect()
    }

    /// Intersect two tidsets with a linear merge.
    ///
    /// A tid survives iff present in both; its probability is the product of
    /// the inputs' probabilities (item occurrences are independent).
    #[must_use]
    pub fn intersect(&self, other: &Tidset) -> Tidset {
        let mut result = Vec::with_capacity(self.len().min(other.len()));
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, b) = (&self.entries[i], &other.entries[j]);
            match a.tid.cmp(&b.tid) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    result.push(TidProb {
                        tid: a.tid,
                        prob: a.prob * b.prob,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }
        Tidset { entries: result }
    }

    /// Append an entry. Internal constructor path for database indexing;
    /// the caller guarantees ascending tids and a valid probability.
    pub(crate) fn push(&mut self, tid: Tid, prob: f64) {
        debug_assert!(self.entries.last().is_none_or(|e| e.tid < tid));
        debug_assert!(prob > 0.0 && prob <= 1.0);
        self.entries.push(TidProb { tid, prob });
    }
}
