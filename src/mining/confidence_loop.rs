//! Confidence Loop Controller (spec.md §4.4).

use super::apriori::FrequentItemSets;
use super::rules::{generate_rules, AssociationRule};
use crate::item::Item;

pub struct ConfidenceLoopResult<I: Item> {
    pub rules: Vec<AssociationRule<I>>,
    pub effective_min_confidence: f64,
}

/// Runs the Rule Generator at decreasing confidence thresholds, returning
/// the rule set with the **largest** cardinality observed, ties broken by
/// the larger threshold (spec.md §4.4's tightened rule — the full
/// threshold range must be swept, unlike the Support Loop's first-
/// satisfaction shortcut, since neither monotonicity nor an early exit is
/// guaranteed by spec.md for this loop).
pub fn run_confidence_loop<I: Item>(
    frequent: &FrequentItemSets<I>,
    min_confidence: f64,
    max_confidence: f64,
    confidence_delta: f64,
    target_count: usize,
) -> ConfidenceLoopResult<I> {
    if target_count == 0 {
        let rules = generate_rules(frequent, min_confidence);
        return ConfidenceLoopResult {
            rules,
            effective_min_confidence: min_confidence,
        };
    }

    // `c` is recomputed from the step count each iteration, like the
    // Support Loop Controller, so it doesn't drift off an exact boundary.
    let mut best_rules = generate_rules(frequent, max_confidence);
    let mut best_c = max_confidence;
    let mut step: u32 = 0;

    loop {
        log::debug!(
            "confidence_loop: c={} yielded {} rules (target {})",
            best_c,
            best_rules.len(),
            target_count
        );
        if best_rules.len() >= target_count {
            return ConfidenceLoopResult {
                rules: best_rules,
                effective_min_confidence: best_c,
            };
        }

        let next_c = max_confidence - (step + 1) as f64 * confidence_delta;
        if next_c < min_confidence {
            return ConfidenceLoopResult {
                rules: best_rules,
                effective_min_confidence: best_c,
            };
        }
        step += 1;
        let candidate = generate_rules(frequent, next_c);
        if candidate.len() > best_rules.len()
            || (candidate.len() == best_rules.len() && next_c > best_c)
        {
            best_c = next_c;
            best_rules = candidate;
        }
    }
}
