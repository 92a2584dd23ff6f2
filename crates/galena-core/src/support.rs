//! # Probabilistic Support Calculators
//!
//! Support in an uncertain database is probabilistic: with each transaction
//! t contributing an independent Bernoulli trial with probability `p[t]`,
//! the support count S of an itemset is the sum of those trials. The
//! probability mass function of S is the coefficient vector of the
//! generating function
//!
//! ```text
//! G(x) = prod_t ((1 - p_t) + p_t * x)
//! ```
//!
//! From the pmf the calculators derive the right tail `P(S >= s)` and
//! report the probabilistic support `s* = max{ s : P(S >= s) >= tau }`
//! together with `P(S >= s*)`.
//!
//! Two interchangeable strategies construct the same pmf:
//! - [`DirectConvolutionCalculator`] multiplies the running coefficient
//!   vector by one linear factor per transaction (O(m²), O(m) space).
//! - [`DivideAndConquerCalculator`] splits the probability vector, solves
//!   the halves recursively, and convolves them; the same asymptotic cost
//!   with better locality on long vectors.
//!
//! Both must report identical `s*` and agree on the tail probability to
//! within 1e-9; the test suite asserts this.

use crate::tidset::Tidset;
use crate::types::{GalenaError, MIN_PROB};
use serde::{Deserialize, Serialize};

// =============================================================================
// RESULT & TRAIT
// =============================================================================

/// Result of a probabilistic-support computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportResult {
    /// `s* = max{ s : P(S >= s) >= tau }`.
    pub support: usize,
    /// `P(S >= s*)`, the tail probability at that level.
    pub probability: f64,
}

impl SupportResult {
    /// The zero result for impossible itemsets.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            support: 0,
            probability: 0.0,
        }
    }
}

/// Strategy interface for probabilistic-support computation.
///
/// `Send + Sync` because Phase 1 of the pipeline invokes the calculator from
/// a worker pool. Implementations are stateless apart from tau.
pub trait SupportCalculator: Send + Sync {
    /// Human-readable strategy name for reporting.
    fn name(&self) -> &'static str;

    /// Compute from a dense per-transaction probability vector. Entries
    /// below [`MIN_PROB`] are treated as impossible. An empty vector yields
    /// the zero result.
    fn support_from_probabilities(&self, probs: &[f64]) -> SupportResult;

    /// Compute from a sparse tidset.
    ///
    /// Shortcuts to the zero result on an empty tidset; otherwise only the
    /// non-zero entries participate (transactions outside the tidset
    /// contribute a factor of 1 to the generating function).
    fn support_from_tidset(&self, tidset: &Tidset) -> SupportResult {
        if tidset.is_empty() {
            return SupportResult::zero();
        }
        self.support_from_probabilities(&tidset.probabilities())
    }
}

// =============================================================================
// SHARED TAIL RESOLUTION
// =============================================================================

/// Validate tau at calculator construction.
fn validate_tau(tau: f64) -> Result<f64, GalenaError> {
    if tau > 0.0 && tau <= 1.0 {
        Ok(tau)
    } else {
        Err(GalenaError::InvalidParameter(format!(
            "tau must be in (0, 1], got: {tau:.4}"
        )))
    }
}

/// Turn a pmf into `(s*, P(S >= s*))`.
///
/// Scans tails from the right so the first level satisfying the threshold
/// is the maximal one. `P(S >= 0)` is 1 by definition, which also absorbs
/// any accumulated rounding deficit in the total mass.
fn resolve_support(pmf: &[f64], tau: f64) -> SupportResult {
    let mut tails = vec![0.0f64; pmf.len()];
    let mut acc = 0.0;
    for s in (0..pmf.len()).rev() {
        acc += pmf[s];
        tails[s] = acc.min(1.0);
    }
    if let Some(first) = tails.first_mut() {
        *first = 1.0;
    }

    for s in (0..tails.len()).rev() {
        if tails[s] >= tau {
            return SupportResult {
                support: s,
                probability: tails[s],
            };
        }
    }
    SupportResult::zero()
}

/// Clamp coefficients that underflowed the numerical floor.
fn clamp_pmf(pmf: &mut [f64]) {
    for coeff in pmf {
        if *coeff < MIN_PROB {
            *coeff = 0.0;
        }
    }
}

// =============================================================================
// DIRECT CONVOLUTION
// =============================================================================

/// Sequential generating-function calculator.
///
/// Maintains a running coefficient vector and multiplies in one linear
/// factor `(1 - p) + p*x` per transaction.
#[derive(Debug, Clone)]
pub struct DirectConvolutionCalculator {
    tau: f64,
}

impl DirectConvolutionCalculator {
    /// Create a calculator for the given probability threshold.
    pub fn new(tau: f64) -> Result<Self, GalenaError> {
        Ok(Self {
            tau: validate_tau(tau)?,
        })
    }

    /// The configured threshold.
    #[must_use]
    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl SupportCalculator for DirectConvolutionCalculator {
    fn name(&self) -> &'static str {
        "direct convolution"
    }

    fn support_from_probabilities(&self, probs: &[f64]) -> SupportResult {
        if probs.is_empty() {
            return SupportResult::zero();
        }

        // pmf of the empty product: support 0 with certainty.
        let mut pmf = Vec::with_capacity(probs.len() + 1);
        pmf.push(1.0);

        for &p in probs {
            if p < MIN_PROB {
                continue;
            }
            let q = 1.0 - p;
            pmf.push(0.0);
            for s in (1..pmf.len()).rev() {
                pmf[s] = pmf[s] * q + pmf[s - 1] * p;
            }
            pmf[0] *= q;
        }

        clamp_pmf(&mut pmf);
        resolve_support(&pmf, self.tau)
    }
}

// =============================================================================
// DIVIDE & CONQUER
// =============================================================================

/// Hierarchical generating-function calculator.
///
/// Recursively splits the probability vector, solves each half, and merges
/// the two pmfs with a discrete convolution: the halves' trial sums are
/// independent, so the sum's distribution is the convolution of theirs.
#[derive(Debug, Clone)]
pub struct DivideAndConquerCalculator {
    tau: f64,
}

impl DivideAndConquerCalculator {
    /// Create a calculator for the given probability threshold.
    pub fn new(tau: f64) -> Result<Self, GalenaError> {
        Ok(Self {
            tau: validate_tau(tau)?,
        })
    }

    fn distribution(probs: &[f64]) -> Vec<f64> {
        match probs {
            [] => vec![1.0],
            [p] => {
                if *p < MIN_PROB {
                    // Treated as impossible: the trial contributes nothing.
                    vec![1.0, 0.0]
                } else {
                    vec![1.0 - p, *p]
                }
            }
            _ => {
                let mid = probs.len() / 2;
                let left = Self::distribution(&probs[..mid]);
                let right = Self::distribution(&probs[mid..]);
                convolve(&left, &right)
            }
        }
    }
}

impl SupportCalculator for DivideAndConquerCalculator {
    fn name(&self) -> &'static str {
        "divide & conquer"
    }

    fn support_from_probabilities(&self, probs: &[f64]) -> SupportResult {
        if probs.is_empty() {
            return SupportResult::zero();
        }
        let mut pmf = Self::distribution(probs);
        clamp_pmf(&mut pmf);
        resolve_support(&pmf, self.tau)
    }
}

/// Discrete convolution: `out[s] = sum_i a[i] * b[s - i]`.
fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        if ai == 0.0 {
            continue;
        }
        for (j, &bj) in b.iter().enumerate() {
            out[i + j] += ai * bj;
        }
    }
    out
}
