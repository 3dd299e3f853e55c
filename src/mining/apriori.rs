//! Frequent Item Set Finder (spec.md §4.1): level-wise Apriori.

use crate::errors::{MiningError, Result};
use crate::item::{Item, TimeInterval};
use crate::item_set::ItemSet;
use crate::transaction::Transaction;
use ahash::{AHashMap, AHashSet};
use std::collections::HashMap;

/// Map from item-set fingerprint to the item set itself, spec.md §3's
/// "Frequent-set map" entity.
pub type FrequentItemSets<I> = HashMap<u64, ItemSet<I>>;

/// Upper bound on the number of live candidates at any single level,
/// guarding against the combinatorial blowup spec.md §4.1 warns about at
/// `min_support = 0`. Exceeding it surfaces `Unsupported` rather than
/// silently running out of memory.
const MAX_CANDIDATES_PER_LEVEL: usize = 200_000;

/// Runs the Finder once at a fixed `(min_support, max_support)` pair.
///
/// `transactions` is scanned once per level (spec.md §4.1 step 1/4); being
/// a slice, it's trivially replayable across levels (spec.md §5).
pub fn find_frequent_itemsets<I, T>(
    transactions: &[T],
    min_support: f64,
    max_support: f64,
) -> Result<FrequentItemSets<I>>
where
    I: Item,
    T: Transaction<I>,
{
    validate_support_range(min_support, max_support)?;

    let n = transactions.len();
    if n == 0 {
        return Ok(FrequentItemSets::new());
    }

    let min_count = min_support_count(min_support, n);
    let has_temporal_data = transactions.iter().any(|tx| tx.time_interval().is_some());

    // Level 1: count individual items directly (spec.md §4.1 step 1) —
    // no need to re-scan through the generic candidate-counting path for
    // singletons, we already have their exact counts from this one pass.
    // A transaction's items are a set (spec.md §3: duplicates count once),
    // so each distinct item increments its counter at most once per
    // transaction.
    let mut item_counts: AHashMap<I, usize> = AHashMap::default();
    for tx in transactions {
        let mut seen: AHashSet<&I> = AHashSet::default();
        for item in tx.items() {
            if seen.insert(item) {
                *item_counts.entry(item.clone()).or_insert(0) += 1;
            }
        }
    }

    let singletons: Vec<Vec<I>> = item_counts
        .keys()
        .filter(|item| item_counts[item] >= min_count)
        .map(|item| vec![item.clone()])
        .collect();

    log::debug!(
        "apriori: level 1 produced {} frequent items out of {} distinct",
        singletons.len(),
        item_counts.len()
    );

    // value-keyed working table: true equality, not fingerprint hash.
    let mut frequent: HashMap<Vec<I>, (f64, Option<TimeInterval>)> = HashMap::new();
    let singleton_witnesses = if has_temporal_data {
        Some(witness_intervals(transactions, &singletons))
    } else {
        None
    };
    let mut next_level_input: Vec<(Vec<I>, usize)> = Vec::new();
    for item in singletons {
        let count = item_counts[&item[0]];
        let support = count as f64 / n as f64;
        let interval = singleton_witnesses
            .as_ref()
            .and_then(|w| w.get(&item).copied().flatten());
        frequent.insert(item.clone(), (support, interval));
        next_level_input.push((item, count));
    }

    let mut k = 1;
    loop {
        if next_level_input.is_empty() {
            break;
        }

        let mut level = generate_candidates(&next_level_input, &frequent, k);
        if level.len() > MAX_CANDIDATES_PER_LEVEL {
            return Err(MiningError::Unsupported(format!(
                "candidate count at level {} exceeded the ceiling of {} (min_support too low for this data set)",
                k + 1,
                MAX_CANDIDATES_PER_LEVEL
            )));
        }
        if level.is_empty() {
            break;
        }

        let counts = count_support(transactions, &level);
        level.retain(|candidate| *counts.get(candidate).unwrap_or(&0) >= min_count);

        let witnesses = if has_temporal_data {
            Some(witness_intervals(transactions, &level))
        } else {
            None
        };

        next_level_input = Vec::new();
        for candidate in level {
            let count = counts[&candidate];
            let support = count as f64 / n as f64;
            let interval = witnesses
                .as_ref()
                .and_then(|w| w.get(&candidate).copied().flatten());
            frequent.insert(candidate.clone(), (support, interval));
            next_level_input.push((candidate, count));
        }

        log::debug!(
            "apriori: level {} kept {} frequent sets",
            k + 1,
            next_level_input.len()
        );
        k += 1;
    }

    let result: FrequentItemSets<I> = frequent
        .into_iter()
        .filter(|(_, (support, _))| *support <= max_support)
        .map(|(items, (support, interval))| {
            let set = ItemSet::from_sorted(items, support).with_interval(interval);
            (set.fingerprint(), set)
        })
        .collect();

    Ok(result)
}

fn validate_support_range(min_support: f64, max_support: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&min_support) {
        return Err(MiningError::InvalidArgument(format!(
            "min_support must be in [0, 1], got {}",
            min_support
        )));
    }
    if !(0.0..=1.0).contains(&max_support) {
        return Err(MiningError::InvalidArgument(format!(
            "max_support must be in [0, 1], got {}",
            max_support
        )));
    }
    if max_support < min_support {
        return Err(MiningError::InvalidArgument(format!(
            "max_support ({}) must be >= min_support ({})",
            max_support, min_support
        )));
    }
    Ok(())
}

/// The minimum number of transactions a set must appear in to meet
/// `min_support`. A tiny epsilon guards against floating-point drift in
/// the caller's threshold (e.g. a support-loop step landing on
/// `0.6000000000000001` instead of `0.6`) pushing the count up by one at
/// an exact boundary.
fn min_support_count(min_support: f64, n: usize) -> usize {
    (min_support * n as f64 - 1e-9).ceil().max(0.0) as usize
}

/// Scans the transaction source once, incrementing the counter of every
/// candidate fully contained in the transaction (spec.md §4.1 step 4).
fn count_support<I, T>(transactions: &[T], candidates: &[Vec<I>]) -> AHashMap<Vec<I>, usize>
where
    I: Item,
    T: Transaction<I>,
{
    let mut counts: AHashMap<Vec<I>, usize> = AHashMap::default();
    for candidate in candidates {
        counts.insert(candidate.clone(), 0);
    }
    for tx in transactions {
        for candidate in candidates {
            if tx.contains_all(candidate) {
                *counts.get_mut(candidate).unwrap() += 1;
            }
        }
    }
    counts
}

/// Intersects the interval of every witnessing transaction, per candidate.
/// `None` in the result means either no transaction witnessed it with an
/// interval, or the witnessing intervals didn't overlap at all.
fn witness_intervals<I, T>(
    transactions: &[T],
    candidates: &[Vec<I>],
) -> AHashMap<Vec<I>, Option<TimeInterval>>
where
    I: Item,
    T: Transaction<I>,
{
    let mut intervals: AHashMap<Vec<I>, Option<TimeInterval>> = AHashMap::default();
    for candidate in candidates {
        intervals.insert(candidate.clone(), None);
    }

    // `seen` tracks whether a candidate has been witnessed at least once,
    // distinguishing "no interval yet" from "intersected down to nothing".
    let mut seen: AHashMap<Vec<I>, bool> = AHashMap::default();

    for tx in transactions {
        let Some(tx_interval) = tx.time_interval() else {
            continue;
        };
        for candidate in candidates {
            if !tx.contains_all(candidate) {
                continue;
            }
            let already_seen = *seen.entry(candidate.clone()).or_insert(false);
            let slot = intervals.get_mut(candidate).unwrap();
            if !already_seen {
                *slot = Some(tx_interval);
            } else if let Some(running) = *slot {
                *slot = running.intersect(&tx_interval);
            }
            seen.insert(candidate.clone(), true);
        }
    }

    intervals
}

/// Candidate generation with the downward-closure prune (spec.md §4.1
/// steps 2-3): join pairs of level-`k` frequent sets sharing their first
/// `k-1` elements, then discard any candidate with a non-frequent subset.
fn generate_candidates<I: Item>(
    frequent_k: &[(Vec<I>, usize)],
    frequent: &HashMap<Vec<I>, (f64, Option<TimeInterval>)>,
    k: usize,
) -> Vec<Vec<I>> {
    let mut candidates: Vec<Vec<I>> = Vec::new();

    for i in 0..frequent_k.len() {
        for j in (i + 1)..frequent_k.len() {
            let (a, _) = &frequent_k[i];
            let (b, _) = &frequent_k[j];
            if let Some(candidate) = join(a, b) {
                candidates.push(candidate);
            }
        }
    }

    candidates.sort();
    candidates.dedup();

    if k < 2 {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|candidate| has_all_subsets_frequent(candidate, frequent))
        .collect()
}

/// Joins two sorted `k`-item sets that share their first `k-1` elements
/// into a `(k+1)`-item candidate, or `None` if they can't be joined.
fn join<I: Item>(a: &[I], b: &[I]) -> Option<Vec<I>> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let k = a.len();
    if a[..k - 1] != b[..k - 1] {
        return None;
    }
    if a[k - 1] == b[k - 1] {
        return None;
    }
    let mut joined = a.to_vec();
    let last = b[k - 1].clone();
    match joined.binary_search(&last) {
        Ok(_) => None,
        Err(pos) => {
            joined.insert(pos, last);
            Some(joined)
        }
    }
}

/// Every `(k)`-sized subset of a `(k+1)`-candidate must already be
/// frequent (spec.md §4.1 step 3 / §8 invariant 2: downward closure).
fn has_all_subsets_frequent<I: Item>(
    candidate: &[I],
    frequent: &HashMap<Vec<I>, (f64, Option<TimeInterval>)>,
) -> bool {
    for skip in 0..candidate.len() {
        let subset: Vec<I> = candidate
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, item)| item.clone())
            .collect();
        if !frequent.contains_key(&subset) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::SimpleTransaction;

    fn tx(items: &[&str]) -> SimpleTransaction<String> {
        SimpleTransaction::new(items.iter().map(|s| s.to_string()).collect())
    }

    fn scenario_a() -> Vec<SimpleTransaction<String>> {
        vec![
            tx(&["A", "B", "C"]),
            tx(&["A", "B"]),
            tx(&["A", "C"]),
            tx(&["B", "C"]),
            tx(&["A"]),
        ]
    }

    fn support_of(result: &FrequentItemSets<String>, items: &[&str]) -> Option<f64> {
        let target: Vec<String> = items.iter().map(|s| s.to_string()).collect();
        result
            .values()
            .find(|set| set.items() == target.as_slice())
            .map(|set| set.support)
    }

    #[test]
    fn scenario_a_textbook() {
        let transactions = scenario_a();
        let result = find_frequent_itemsets(&transactions, 0.4, 1.0).unwrap();

        assert_eq!(support_of(&result, &["A"]), Some(0.8));
        assert_eq!(support_of(&result, &["B"]), Some(0.6));
        assert_eq!(support_of(&result, &["C"]), Some(0.6));
        assert_eq!(support_of(&result, &["A", "B"]), Some(0.4));
        assert_eq!(support_of(&result, &["A", "C"]), Some(0.4));
        assert_eq!(support_of(&result, &["B", "C"]), Some(0.4));
        // {A,B,C} has support 0.2, below the 0.4 threshold.
        assert_eq!(support_of(&result, &["A", "B", "C"]), None);
    }

    #[test]
    fn empty_transactions_yield_empty_result() {
        let transactions: Vec<SimpleTransaction<String>> = vec![];
        let result = find_frequent_itemsets(&transactions, 0.4, 1.0).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn downward_closure_holds() {
        let transactions = scenario_a();
        let result = find_frequent_itemsets(&transactions, 0.4, 1.0).unwrap();

        for set in result.values() {
            if set.len() < 2 {
                continue;
            }
            for skip in 0..set.len() {
                let subset: Vec<String> = set
                    .items()
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, item)| item.clone())
                    .collect();
                assert!(
                    result.values().any(|s| s.items() == subset.as_slice()),
                    "subset {:?} of frequent set {:?} is missing",
                    subset,
                    set.items()
                );
            }
        }
    }

    #[test]
    fn every_result_meets_min_support_and_max_support() {
        let transactions = scenario_a();
        let result = find_frequent_itemsets(&transactions, 0.4, 0.7).unwrap();
        for set in result.values() {
            assert!(set.support >= 0.4);
            assert!(set.support <= 0.7);
        }
        // {A} has support 0.8 and must be excluded by max_support.
        assert_eq!(support_of(&result, &["A"]), None);
    }

    #[test]
    fn rejects_invalid_support_bounds() {
        let transactions = scenario_a();
        assert!(find_frequent_itemsets(&transactions, -0.1, 1.0).is_err());
        assert!(find_frequent_itemsets(&transactions, 0.5, 1.5).is_err());
        assert!(find_frequent_itemsets(&transactions, 0.8, 0.2).is_err());
    }

    #[test]
    fn single_item_universe_has_no_pairs() {
        let transactions = vec![tx(&["A"]), tx(&["A"]), tx(&["A"])];
        let result = find_frequent_itemsets(&transactions, 0.5, 1.0).unwrap();
        assert!(result.values().all(|set| set.len() == 1));
    }

    #[test]
    fn duplicate_items_in_one_transaction_count_once() {
        let transactions = vec![tx(&["A", "A", "B"]), tx(&["A"])];
        let result = find_frequent_itemsets(&transactions, 0.5, 1.0).unwrap();
        assert_eq!(support_of(&result, &["A"]), Some(1.0));
    }

    #[test]
    fn temporal_witness_tracking_intersects_intervals() {
        use crate::item::TimeInterval;
        let transactions = vec![
            SimpleTransaction::with_interval(
                vec!["A".to_string(), "B".to_string()],
                TimeInterval::new(10, 20),
            ),
            SimpleTransaction::with_interval(
                vec!["A".to_string(), "B".to_string()],
                TimeInterval::new(15, 25),
            ),
        ];
        let result = find_frequent_itemsets(&transactions, 0.5, 1.0).unwrap();
        let ab = result
            .values()
            .find(|s| s.items() == ["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(ab.interval(), Some(TimeInterval::new(15, 20)));
    }

    #[test]
    fn no_temporal_data_means_no_interval() {
        let transactions = scenario_a();
        let result = find_frequent_itemsets(&transactions, 0.4, 1.0).unwrap();
        assert!(result.values().all(|set| set.interval().is_none()));
    }
}
