//! Rule Set (spec.md §4.6): ordered container supporting sort/top-k/filter.

use crate::item::Item;
use crate::metrics::RuleComparator;
use crate::mining::rules::AssociationRule;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Ordered collection of rules, deduplicated by `(body, head, interval)`
/// on construction, generalizing the teacher's `filter_bidirectional_rules`
/// seen-pairs pattern (which only deduplicated unordered body/head pairs;
/// this keeps `A→B` and `B→A` as distinct rules, since spec.md §3 defines
/// uniqueness over the ordered `(body, head, interval)` triple).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet<I: Item> {
    rules: Vec<AssociationRule<I>>,
}

impl<I: Item> RuleSet<I> {
    pub fn new(rules: Vec<AssociationRule<I>>) -> Self {
        let mut seen: AHashSet<(Vec<I>, Vec<I>, Option<(i64, i64)>)> = AHashSet::default();
        let mut deduped = Vec::with_capacity(rules.len());
        for rule in rules {
            let key = (
                rule.body().to_vec(),
                rule.head().to_vec(),
                rule.interval().map(|iv| (iv.start, iv.end)),
            );
            if seen.insert(key) {
                deduped.push(rule);
            }
        }
        RuleSet { rules: deduped }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssociationRule<I>> {
        self.rules.iter()
    }

    pub fn push(&mut self, rule: AssociationRule<I>) {
        self.rules.push(rule);
    }

    /// A new view of this set ordered by `comparator`; the original is
    /// untouched.
    pub fn sort_by(&self, comparator: &dyn RuleComparator<I>) -> RuleSet<I> {
        let mut rules = self.rules.clone();
        rules.sort_by(|a, b| comparator.compare(a, b));
        RuleSet { rules }
    }

    pub fn sort_by_in_place(&mut self, comparator: &dyn RuleComparator<I>) {
        self.rules.sort_by(|a, b| comparator.compare(a, b));
    }

    /// `top_k(k, c) = sort(c).take(k)` (spec.md §8's algebraic law).
    pub fn top_k(&self, k: usize, comparator: &dyn RuleComparator<I>) -> RuleSet<I> {
        let mut sorted = self.sort_by(comparator);
        sorted.rules.truncate(k);
        sorted
    }

    pub fn filter<F>(&self, predicate: F) -> RuleSet<I>
    where
        F: Fn(&AssociationRule<I>) -> bool,
    {
        RuleSet {
            rules: self
                .rules
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{ByMetric, ConfidenceMetric, SupportMetric};
    use crate::mining::apriori::find_frequent_itemsets;
    use crate::mining::rules::generate_rules;
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

    fn rule_set() -> RuleSet<String> {
        let frequent = find_frequent_itemsets(&scenario_a(), 0.4, 1.0).unwrap();
        RuleSet::new(generate_rules(&frequent, 0.0))
    }

    #[test]
    fn duplicate_rules_are_collapsed_on_construction() {
        let set = rule_set();
        let doubled: Vec<_> = set.iter().chain(set.iter()).cloned().collect();
        let redone = RuleSet::new(doubled);
        assert_eq!(redone.len(), set.len());
    }

    #[test]
    fn top_k_equals_sort_then_take() {
        let set = rule_set();
        let comparator = ByMetric::new(SupportMetric);
        let k = 3.min(set.len());

        let top = set.top_k(k, &comparator);
        let sorted = set.sort_by(&comparator);
        let manual: Vec<_> = sorted.iter().take(k).cloned().collect();

        assert_eq!(top.len(), manual.len());
        for (a, b) in top.iter().zip(manual.iter()) {
            assert_eq!(a.body(), b.body());
            assert_eq!(a.head(), b.head());
        }
    }

    #[test]
    fn sort_by_does_not_mutate_the_original_order() {
        let set = rule_set();
        let original: Vec<_> = set.iter().map(|r| (r.body().to_vec(), r.head().to_vec())).collect();
        let _ = set.sort_by(&ByMetric::new(ConfidenceMetric));
        let after: Vec<_> = set.iter().map(|r| (r.body().to_vec(), r.head().to_vec())).collect();
        assert_eq!(original, after);
    }

    #[test]
    fn filter_keeps_only_matching_rules() {
        let set = rule_set();
        let filtered = set.filter(|r| r.confidence() >= 0.6);
        assert!(filtered.iter().all(|r| r.confidence() >= 0.6));
        assert!(filtered.len() <= set.len());
    }
}
