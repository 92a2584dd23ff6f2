//! # Pruning Profile
//!
//! Independently toggleable pruning rules. Every rule is a
//! correctness-preserving shortcut: any subset of them yields the same
//! closed top-k result as any other subset; only the work performed
//! differs. The profile exists for ablation experiments and is immutable
//! for the duration of a run.
//!
//! - P1: Phase 2 early termination (singleton loop, closure-check loop,
//!   2-itemset seed filter)
//! - P2: Phase 3 threshold handling (best-first early termination,
//!   extension filtering)
//! - P3: item-support cutoff in the extension loop
//! - P4: subset-based upper-bound tightening via cached 2-itemsets
//! - P5: upper-bound filtering of extensions
//! - P6: tidset-size cutoff before support computation
//! - P7: tidset-based closure shortcut

use serde::{Deserialize, Serialize};

/// Boolean flags enabling each pruning rule individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruningProfile {
    pub p1: bool,
    pub p2: bool,
    pub p3: bool,
    pub p4: bool,
    pub p5: bool,
    pub p6: bool,
    pub p7: bool,
}

impl Default for PruningProfile {
    fn default() -> Self {
        Self::all()
    }
}

impl PruningProfile {
    /// All rules enabled (production setting).
    #[must_use]
    pub fn all() -> Self {
        Self {
            p1: true,
            p2: true,
            p3: true,
            p4: true,
            p5: true,
            p6: true,
            p7: true,
        }
    }

    /// No rules enabled (baseline for ablation).
    #[must_use]
    pub fn none() -> Self {
        Self {
            p1: false,
            p2: false,
            p3: false,
            p4: false,
            p5: false,
            p6: false,
            p7: false,
        }
    }

    /// Incremental ladder: level 0 is the baseline, level n enables
    /// P1 through Pn, level 7 and above is the full profile.
    #[must_use]
    pub fn level(n: u8) -> Self {
        let mut profile = Self::none();
        let flags = [
            &mut profile.p1,
            &mut profile.p2,
            &mut profile.p3,
            &mut profile.p4,
            &mut profile.p5,
            &mut profile.p6,
            &mut profile.p7,
        ];
        for (i, flag) in flags.into_iter().enumerate() {
            *flag = (i as u8) < n;
        }
        profile
    }

    /// Profile from a bitmask: bit i enables rule P(i+1). Masks 0..128
    /// enumerate every subset.
    #[must_use]
    pub fn from_bits(mask: u8) -> Self {
        Self {
            p1: mask & 0b000_0001 != 0,
            p2: mask & 0b000_0010 != 0,
            p3: mask & 0b000_0100 != 0,
            p4: mask & 0b000_1000 != 0,
            p5: mask & 0b001_0000 != 0,
            p6: mask & 0b010_0000 != 0,
            p7: mask & 0b100_0000 != 0,
        }
    }

    /// Number of enabled rules.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        [
            self.p1, self.p2, self.p3, self.p4, self.p5, self.p6, self.p7,
        ]
        .iter()
        .filter(|&&f| f)
        .count()
    }

    /// Configuration name for experiment reports: `BASE`, `ALL`, or the
    /// concatenation of the enabled rules.
    #[must_use]
    pub fn name(&self) -> String {
        match self.enabled_count() {
            0 => "BASE".to_string(),
            7 => "ALL".to_string(),
            _ => {
                let mut name = String::new();
                let flags = [
                    (self.p1, "+P1"),
                    (self.p2, "+P2"),
                    (self.p3, "+P3"),
                    (self.p4, "+P4"),
                    (self.p5, "+P5"),
                    (self.p6, "+P6"),
                    (self.p7, "+P7"),
                ];
                for (enabled, tag) in flags {
                    if enabled {
                        name.push_str(tag);
                    }
                }
                name
            }
        }
    }
}
