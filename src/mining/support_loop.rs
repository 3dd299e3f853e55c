//! Support Loop Controller (spec.md §4.2).

use super::apriori::{find_frequent_itemsets, FrequentItemSets};
use crate::errors::Result;
use crate::item::Item;
use crate::transaction::Transaction;

/// Result of running the controller: the frequent-set map and the support
/// threshold at which it was produced, so the driver can report it as an
/// effective threshold.
pub struct SupportLoopResult<I: Item> {
    pub result: FrequentItemSets<I>,
    pub effective_min_support: f64,
}

/// Runs the Finder at `max_support` first, then at decreasing thresholds
/// `max_support - k * support_delta` until `target_count` is met or
/// `min_support` is crossed.
///
/// Per the first-satisfaction reading of spec.md §4.2's Open Question: the
/// loop is monotone in the number of results as `s` decreases, so the
/// first threshold that satisfies the target is already optimal and the
/// loop returns immediately rather than tracking a running best.
pub fn run_support_loop<I, T>(
    transactions: &[T],
    min_support: f64,
    max_support: f64,
    support_delta: f64,
    target_count: usize,
) -> Result<SupportLoopResult<I>>
where
    I: Item,
    T: Transaction<I>,
{
    if target_count == 0 {
        let result = find_frequent_itemsets(transactions, min_support, max_support)?;
        return Ok(SupportLoopResult {
            result,
            effective_min_support: min_support,
        });
    }

    // `s` is recomputed from the step count each iteration rather than
    // accumulated via repeated subtraction, so it doesn't drift off the
    // documented boundary (e.g. 0.6 becoming 0.6000000000000001 after a
    // few float subtractions).
    let mut step: u32 = 0;
    loop {
        let s = max_support - step as f64 * support_delta;
        let last = find_frequent_itemsets(transactions, s, max_support)?;
        log::debug!(
            "support_loop: s={} yielded {} item sets (target {})",
            s,
            last.len(),
            target_count
        );
        if last.len() >= target_count {
            return Ok(SupportLoopResult {
                result: last,
                effective_min_support: s,
            });
        }

        let next_s = max_support - (step + 1) as f64 * support_delta;
        if next_s < min_support {
            return Ok(SupportLoopResult {
                result: last,
                effective_min_support: s,
            });
        }
        step += 1;
    }
}
