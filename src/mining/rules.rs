//! Association Rule Generator (spec.md §4.3).

use super::apriori::FrequentItemSets;
use crate::item::{Item, TimeInterval};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// `body → head`: an implication between two disjoint, non-empty item sets.
///
/// Per spec.md §9, a single type with an optional interval field stands in
/// for the source's separate temporal/non-temporal rule hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationRule<I: Item> {
    body: Vec<I>,
    head: Vec<I>,
    support: f64,
    body_support: f64,
    head_support: f64,
    interval: Option<TimeInterval>,
}

impl<I: Item> AssociationRule<I> {
    pub fn body(&self) -> &[I] {
        &self.body
    }

    pub fn head(&self) -> &[I] {
        &self.head
    }

    /// `support(body ∪ head)`.
    pub fn support(&self) -> f64 {
        self.support
    }

    pub fn body_support(&self) -> f64 {
        self.body_support
    }

    pub fn head_support(&self) -> f64 {
        self.head_support
    }

    /// `support(body ∪ head) / support(body)`.
    pub fn confidence(&self) -> f64 {
        self.support / self.body_support
    }

    /// The intersection of the validity intervals of every transaction
    /// that witnessed `body ∪ head`, if witness tracking produced one.
    pub fn interval(&self) -> Option<TimeInterval> {
        self.interval
    }

    /// `true` if `timestamp` falls inside this rule's interval. Always
    /// `false` for a rule with no interval.
    pub fn is_valid_at(&self, timestamp: i64) -> bool {
        self.interval.map_or(false, |iv| iv.includes(timestamp))
    }
}

/// Builds every rule `body → head` derivable from `frequent` with
/// `confidence ≥ min_confidence` (spec.md §4.3's contract — confidence is
/// the only generation-time filter; lift remains available as a ranking
/// [`crate::metrics::Metric`] rather than a second generation gate).
pub fn generate_rules<I: Item>(
    frequent: &FrequentItemSets<I>,
    min_confidence: f64,
) -> Vec<AssociationRule<I>> {
    // value-keyed support lookup: frequent is fingerprint-keyed, and two
    // distinct item sets could collide on a fingerprint (spec.md §3).
    let support_by_items: AHashMap<&[I], f64> = frequent
        .values()
        .map(|set| (set.items(), set.support))
        .collect();

    let mut rules = Vec::new();

    for set in frequent.values() {
        if set.len() < 2 {
            continue;
        }

        for head in non_empty_proper_subsets(set.items()) {
            let body: Vec<I> = set
                .items()
                .iter()
                .filter(|item| !head.contains(item))
                .cloned()
                .collect();
            if body.is_empty() {
                continue;
            }

            let Some(&body_support) = support_by_items.get(body.as_slice()) else {
                continue;
            };
            if body_support <= 0.0 {
                continue;
            }

            let confidence = set.support / body_support;
            if confidence < min_confidence {
                continue;
            }

            let Some(&head_support) = support_by_items.get(head.as_slice()) else {
                continue;
            };

            rules.push(AssociationRule {
                body,
                head,
                support: set.support,
                body_support,
                head_support,
                interval: set.interval(),
            });
        }
    }

    rules.sort_by(|a, b| b.support.partial_cmp(&a.support).unwrap());
    rules
}

/// Every non-empty proper subset of a sorted slice, as candidate heads
/// (spec.md §4.3's derivation step). Mirrors the teacher's bitmask scheme.
fn non_empty_proper_subsets<I: Item>(items: &[I]) -> Vec<Vec<I>> {
    let n = items.len();
    let mut subsets = Vec::with_capacity((1usize << n).saturating_sub(2));
    for mask in 1..(1u32 << n) - 1 {
        let subset: Vec<I> = (0..n)
            .filter(|j| mask & (1 << j) != 0)
            .map(|j| items[j].clone())
            .collect();
        subsets.push(subset);
    }
    subsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mining::apriori::find_frequent_itemsets;
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

    fn rule<'a>(
        rules: &'a [AssociationRule<String>],
        body: &str,
        head: &str,
    ) -> Option<&'a AssociationRule<String>> {
        rules
            .iter()
            .find(|r| r.body() == [body.to_string()] && r.head() == [head.to_string()])
    }

    #[test]
    fn scenario_a_rules_at_point_six_confidence() {
        let frequent = find_frequent_itemsets(&scenario_a(), 0.4, 1.0).unwrap();
        let rules = generate_rules(&frequent, 0.6);

        assert!(rule(&rules, "A", "B").is_none(), "A->B has confidence 0.5");
        assert!(rule(&rules, "A", "C").is_none(), "A->C has confidence 0.5");

        let b_to_a = rule(&rules, "B", "A").unwrap();
        assert!((b_to_a.confidence() - 0.6667).abs() < 1e-3);

        let c_to_a = rule(&rules, "C", "A").unwrap();
        assert!((c_to_a.confidence() - 0.6667).abs() < 1e-3);

        let b_to_c = rule(&rules, "B", "C").unwrap();
        assert!((b_to_c.confidence() - 0.6667).abs() < 1e-3);

        let c_to_b = rule(&rules, "C", "B").unwrap();
        assert!((c_to_b.confidence() - 0.6667).abs() < 1e-3);
    }

    #[test]
    fn every_rule_has_disjoint_non_empty_body_and_head() {
        let frequent = find_frequent_itemsets(&scenario_a(), 0.4, 1.0).unwrap();
        let rules = generate_rules(&frequent, 0.0);
        for r in &rules {
            assert!(!r.body().is_empty());
            assert!(!r.head().is_empty());
            assert!(r.body().iter().all(|item| !r.head().contains(item)));
        }
    }

    #[test]
    fn single_item_universe_has_no_rules() {
        let transactions = vec![tx(&["A"]), tx(&["A"]), tx(&["A"])];
        let frequent = find_frequent_itemsets(&transactions, 0.5, 1.0).unwrap();
        let rules = generate_rules(&frequent, 0.0);
        assert!(rules.is_empty());
    }

    #[test]
    fn output_is_sorted_by_descending_support() {
        let frequent = find_frequent_itemsets(&scenario_a(), 0.4, 1.0).unwrap();
        let rules = generate_rules(&frequent, 0.0);
        for window in rules.windows(2) {
            assert!(window[0].support() >= window[1].support());
        }
    }

    #[test]
    fn temporal_interval_propagates_from_itemset_to_rule() {
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
        let frequent = find_frequent_itemsets(&transactions, 0.5, 1.0).unwrap();
        let rules = generate_rules(&frequent, 0.0);
        let a_to_b = rule(&rules, "A", "B").unwrap();
        assert_eq!(a_to_b.interval(), Some(TimeInterval::new(15, 20)));
    }
}
