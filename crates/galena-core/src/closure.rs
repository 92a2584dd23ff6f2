//! # Closure Engine
//!
//! Closure checks for singletons (Phase 2) and the combined
//! closure-check-plus-extension-generation step driving Phase 3.
//!
//! An itemset X is closed iff no strict superset has the same probabilistic
//! support. Anti-monotonicity (`sup(X ∪ {i}) <= min(sup(X), sup({i}))`)
//! underlies every shortcut here: once the candidate items, walked in
//! descending-support order, fall below `sup(X)`, none of the remaining
//! ones can violate closure, and once they fall below the dynamic threshold
//! none of their extensions can reach the top-k.

use crate::cache::CachedPattern;
use crate::itemset::{FrequentItemset, Itemset};
use crate::pipeline::MiningRun;
use crate::support::SupportResult;

/// Result of checking one candidate: its closure status and the canonical
/// extensions worth enqueueing, in ascending item order.
#[derive(Debug)]
pub(crate) struct ClosureOutcome {
    pub(crate) is_closed: bool,
    pub(crate) extensions: Vec<FrequentItemset>,
}

impl MiningRun<'_> {
    /// Closure check for the singleton `{a}` against the sorted singleton
    /// list, caching every 2-itemset it computes whose partner meets
    /// `minsup` (those become the Phase 3 seeds).
    pub(crate) fn check_closure_singleton(
        &mut self,
        fi: &FrequentItemset,
        singletons: &[FrequentItemset],
        minsup: usize,
    ) -> bool {
        let item_a = fi.itemset.items()[0];

        for other in singletons {
            let item_b = other.itemset.items()[0];
            if item_a == item_b {
                continue;
            }

            // P1b: the list is support-descending, so from here on
            // sup({a,b}) <= sup({b}) < sup({a}), so closure cannot break.
            if self.profile.p1 && other.support < fi.support {
                break;
            }

            let union = Itemset::pair(item_a, item_b);
            let sup_ab = if let Some(cached) = self.cache.get(&union) {
                self.metrics.cache_hits += 1;
                cached.support
            } else {
                self.metrics.cache_misses += 1;
                let tidset_ab = match (
                    self.cache.get(&fi.itemset),
                    self.cache.get(&other.itemset),
                ) {
                    (Some(a), Some(b)) => a.tidset.intersect(&b.tidset),
                    _ => self.database.tidset(&union),
                };
                self.metrics.tidset_intersections += 1;

                let result = if tidset_ab.is_empty() {
                    SupportResult::zero()
                } else {
                    self.metrics.support_calculations += 1;
                    self.calculator.support_from_tidset(&tidset_ab)
                };

                // Cache only pairs whose partner can still matter in
                // Phase 3 (same threshold the frontier seeding uses).
                if other.support >= minsup {
                    self.cache.insert(
                        union,
                        CachedPattern::new(result.support, result.probability, tidset_ab),
                    );
                }
                result.support
            };

            if sup_ab == fi.support {
                return false;
            }
        }
        true
    }

    /// Check whether `candidate` is closed and collect its viable canonical
    /// extensions, applying pruning rules P3–P7 as enabled by the profile.
    pub(crate) fn check_closure_and_extend(
        &mut self,
        candidate: &FrequentItemset,
        threshold: usize,
    ) -> ClosureOutcome {
        let sup_x = candidate.support;
        let max_item = candidate.itemset.max_item();
        let mut is_closed = true;
        let mut extensions = Vec::new();

        // Once a candidate item's support drops below sup(X), no remaining
        // item can produce a superset with equal support.
        let mut closure_checking_done = false;

        for idx in 0..self.frequent_items.len() {
            let item = self.frequent_items[idx];
            if candidate.itemset.contains(item) {
                continue;
            }

            let item_support = self.item_support(item);

            // P3: every remaining item has at most this support, so none
            // of their extensions can enter the top-k.
            if self.profile.p3 && item_support < threshold {
                self.metrics.pruned_by_p3 += (self.frequent_items.len() - idx - 1) as u64;
                break;
            }

            if !closure_checking_done && item_support < sup_x {
                closure_checking_done = true;
            }

            let mut need_closure_check = !closure_checking_done && is_closed;
            let need_extension = max_item.is_none_or(|m| item > m);

            let mut upper_bound = sup_x.min(item_support);

            // P4: tighten the bound with cached 2-itemset supports;
            // sup(X ∪ {i}) <= sup({e, i}) for every e in X.
            if self.profile.p4 && self.topk.is_full() && need_extension {
                for &existing in candidate.itemset.items() {
                    let pair = Itemset::pair(existing, item);
                    if let Some(cached) = self.cache.get(&pair) {
                        if cached.support < upper_bound {
                            upper_bound = cached.support;
                            self.metrics.pruned_by_p4 += 1;
                        }
                        if upper_bound < threshold {
                            break;
                        }
                    }
                }
            }

            // P5: an extension whose upper bound misses the threshold is
            // not worth materializing.
            let can_enter = upper_bound >= threshold;
            let should_extend = if self.profile.p5 {
                need_extension && can_enter
            } else {
                need_extension
            };
            if self.profile.p5 {
                if !need_closure_check && !should_extend {
                    self.metrics.pruned_by_p5 += 1;
                    continue;
                }
            } else if !need_closure_check && !need_extension {
                continue;
            }

            let extension = candidate.itemset.with_item(item);

            let (sup_xe, prob_xe) = if let Some(cached) = self.cache.get(&extension) {
                self.metrics.cache_hits += 1;
                (cached.support, cached.probability)
            } else {
                self.metrics.cache_misses += 1;
                let tidset_xe = match (
                    self.cache.get(&candidate.itemset),
                    self.cache.get(&self.singletons[item as usize]),
                ) {
                    (Some(x), Some(i)) => x.tidset.intersect(&i.tidset),
                    // Both parents evicted from scope is unexpected but
                    // recoverable: fall back to the database.
                    _ => self.database.tidset(&extension),
                };
                self.metrics.tidset_intersections += 1;
                let m = tidset_xe.len();

                // P6: support cannot exceed the tidset size, so the
                // expensive computation is pointless below the threshold.
                if self.profile.p6 && m < threshold && !need_closure_check {
                    self.cache
                        .insert(extension, CachedPattern::new(0, 0.0, tidset_xe));
                    self.metrics.pruned_by_p6 += 1;
                    continue;
                }

                // P7: m < sup(X) already proves the extension cannot have
                // equal support; only compute if it is still worth pushing.
                // No sentinel here: unlike P6, the bound is relative to this
                // candidate's support, so a cached zero could mask a closure
                // violation of a different parent later.
                if self.profile.p7 && need_closure_check && m < sup_x {
                    self.metrics.pruned_by_p7 += 1;
                    if !should_extend {
                        continue;
                    }
                    need_closure_check = false;
                }

                let result = self.calculator.support_from_tidset(&tidset_xe);
                self.metrics.support_calculations += 1;
                self.cache.insert(
                    extension.clone(),
                    CachedPattern::new(result.support, result.probability, tidset_xe),
                );
                (result.support, result.probability)
            };

            if need_closure_check {
                self.metrics.closure_checks += 1;
                if sup_xe == sup_x {
                    is_closed = false;
                }
            }

            if should_extend {
                extensions.push(FrequentItemset::new(extension, sup_xe, prob_xe));
            }
        }

        // Canonical extensions append past max(X), so itemset order equals
        // ascending new-item order.
        extensions.sort_by(|a, b| a.itemset.cmp(&b.itemset));
        ClosureOutcome { is_closed, extensions }
    }
}
