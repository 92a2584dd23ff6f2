//! # Core Type Definitions
//!
//! This module contains the foundational types for the Galena mining engine:
//! - Item and transaction identifiers (`ItemId`, `Tid`)
//! - Numerical constants (`MIN_PROB`)
//! - Error types (`GalenaError`)
//!
//! ## Determinism Guarantees
//!
//! Mining is a pure function of (database, tau, k, strategy, calculator,
//! pruning profile). Every ordering used by the engine is total: floating
//! point comparisons go through `f64::total_cmp` and ties fall back to the
//! item-id-ascending order of the itemset.

use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Dense item identifier in `[0, V)` assigned by the [`Vocabulary`].
///
/// [`Vocabulary`]: crate::vocab::Vocabulary
pub type ItemId = u32;

/// Transaction identifier in `[0, N)`: the index of a transaction in the
/// database.
pub type Tid = u32;

// =============================================================================
// NUMERICAL CONSTANTS
// =============================================================================

/// Numerical floor for probabilities.
///
/// A single constant governs underflow handling everywhere: tidset entries
/// below this value are treated as impossible by the support calculators,
/// and probability-mass coefficients that underflow it are clamped to zero.
pub const MIN_PROB: f64 = 1e-12;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the Galena engine and its collaborators.
///
/// - No silent failures: invalid parameters and invalid data are rejected
///   at construction or as soon as detected.
/// - Numeric underflow is handled internally (clamped at [`MIN_PROB`]) and
///   never surfaced.
/// - Partial mining results are never returned on failure.
#[derive(Debug, Error)]
pub enum GalenaError {
    /// A mining parameter is out of range (tau outside (0, 1], k < 1,
    /// empty database).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Transaction data violates an invariant (probability outside (0, 1],
    /// non-ascending transaction ids, duplicate items).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An I/O error occurred while loading a database file.
    #[error("i/o error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
