//! Metric layer (spec.md §4.5): pure functions over a rule, plus a
//! composable ordering operator.
//!
//! Rebuilt from the teacher's fixed `PatternMetrics` struct and
//! `AssociationRule::quality_score()` weighted sum into a small trait set,
//! per spec.md §9's guidance to favor dynamic dispatch over a deep
//! hierarchy here: `Metric` and `RuleComparator` are the only polymorphic
//! surfaces in the crate.

use crate::item::Item;
use crate::mining::rules::AssociationRule;
use std::cmp::Ordering;

/// A pure function of a rule, with a declared range used by tests and
/// callers that want to normalize scores.
pub trait Metric<I: Item> {
    fn name(&self) -> &'static str;
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64;
    fn min_value(&self) -> f64;
    fn max_value(&self) -> f64;
}

/// `support(b ∪ h)`.
pub struct SupportMetric;

impl<I: Item> Metric<I> for SupportMetric {
    fn name(&self) -> &'static str {
        "support"
    }
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64 {
        rule.support()
    }
    fn min_value(&self) -> f64 {
        0.0
    }
    fn max_value(&self) -> f64 {
        1.0
    }
}

/// `support(b ∪ h) / support(b)`.
pub struct ConfidenceMetric;

impl<I: Item> Metric<I> for ConfidenceMetric {
    fn name(&self) -> &'static str {
        "confidence"
    }
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64 {
        rule.confidence()
    }
    fn min_value(&self) -> f64 {
        0.0
    }
    fn max_value(&self) -> f64 {
        1.0
    }
}

/// `confidence / support(h)`; independence ratio, 1 means independent.
pub struct LiftMetric;

impl<I: Item> Metric<I> for LiftMetric {
    fn name(&self) -> &'static str {
        "lift"
    }
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64 {
        if rule.head_support() > 0.0 {
            rule.confidence() / rule.head_support()
        } else {
            f64::INFINITY
        }
    }
    fn min_value(&self) -> f64 {
        0.0
    }
    fn max_value(&self) -> f64 {
        f64::INFINITY
    }
}

/// `support(b ∪ h) − support(b)·support(h)`.
///
/// The source reports this metric's range as `[0,1]`; per spec.md §9 that
/// bound is a documented bug (the formula can go negative), so this
/// implementation keeps the signed value and the correct `[-0.25, 0.25]`
/// range instead.
pub struct LeverageMetric;

impl<I: Item> Metric<I> for LeverageMetric {
    fn name(&self) -> &'static str {
        "leverage"
    }
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64 {
        rule.support() - rule.body_support() * rule.head_support()
    }
    fn min_value(&self) -> f64 {
        -0.25
    }
    fn max_value(&self) -> f64 {
        0.25
    }
}

/// `(1 − support(h)) / (1 − confidence)`; `∞` when confidence is 1.
pub struct ConvictionMetric;

impl<I: Item> Metric<I> for ConvictionMetric {
    fn name(&self) -> &'static str {
        "conviction"
    }
    fn evaluate(&self, rule: &AssociationRule<I>) -> f64 {
        let confidence = rule.confidence();
        if confidence >= 1.0 {
            f64::INFINITY
        } else {
            (1.0 - rule.head_support()) / (1.0 - confidence)
        }
    }
    fn min_value(&self) -> f64 {
        0.0
    }
    fn max_value(&self) -> f64 {
        f64::INFINITY
    }
}

/// A total order over rules, composable via [`RuleComparator::then_by`].
pub trait RuleComparator<I: Item> {
    fn compare(&self, a: &AssociationRule<I>, b: &AssociationRule<I>) -> Ordering;

    /// Chains `self` with a fallback comparator used to break ties.
    fn then_by<Other>(self, other: Other) -> ThenBy<Self, Other>
    where
        Self: Sized,
        Other: RuleComparator<I>,
    {
        ThenBy {
            first: self,
            second: other,
        }
    }
}

/// Orders rules by descending value of a single metric.
pub struct ByMetric<M> {
    metric: M,
}

impl<M> ByMetric<M> {
    pub fn new(metric: M) -> Self {
        ByMetric { metric }
    }
}

impl<I: Item, M: Metric<I>> RuleComparator<I> for ByMetric<M> {
    fn compare(&self, a: &AssociationRule<I>, b: &AssociationRule<I>) -> Ordering {
        let va = self.metric.evaluate(a);
        let vb = self.metric.evaluate(b);
        vb.partial_cmp(&va).unwrap_or(Ordering::Equal)
    }
}

/// Primary comparator `A`, falling through to `B` on ties.
pub struct ThenBy<A, B> {
    first: A,
    second: B,
}

impl<I: Item, A: RuleComparator<I>, B: RuleComparator<I>> RuleComparator<I> for ThenBy<A, B> {
    fn compare(&self, a: &AssociationRule<I>, b: &AssociationRule<I>) -> Ordering {
        match self.first.compare(a, b) {
            Ordering::Equal => self.second.compare(a, b),
            ordering => ordering,
        }
    }
}
