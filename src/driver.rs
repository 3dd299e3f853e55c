//! Driver (spec.md §4.7): top-level `mine()` entry point.

use crate::config::MiningConfig;
use crate::errors::Result;
use crate::item::Item;
use crate::mining::apriori::FrequentItemSets;
use crate::mining::confidence_loop::run_confidence_loop;
use crate::mining::support_loop::run_support_loop;
use crate::rule_set::RuleSet;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Result of a mining call: the frequent item sets, the (possibly empty)
/// rule set, and the thresholds actually used to produce them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output<I: Item> {
    frequent_item_sets: FrequentItemSets<I>,
    rules: RuleSet<I>,
    elapsed_secs: f64,
    effective_min_support: f64,
    effective_max_support: f64,
    effective_min_confidence: f64,
    effective_max_confidence: f64,
}

impl<I: Item> Output<I> {
    pub fn frequent_item_sets(&self) -> &FrequentItemSets<I> {
        &self.frequent_item_sets
    }

    pub fn rules(&self) -> &RuleSet<I> {
        &self.rules
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn effective_min_support(&self) -> f64 {
        self.effective_min_support
    }

    pub fn effective_max_support(&self) -> f64 {
        self.effective_max_support
    }

    pub fn effective_min_confidence(&self) -> f64 {
        self.effective_min_confidence
    }

    pub fn effective_max_confidence(&self) -> f64 {
        self.effective_max_confidence
    }
}

impl<I: Item + Serialize + for<'de> Deserialize<'de>> Output<I> {
    /// Serializes this output to JSON. Persistence format is otherwise
    /// unspecified (spec.md §6); JSON is offered because it's the
    /// teacher's own serialization choice throughout `types.rs`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// The single entry point (spec.md §6): validates `config`, runs the
/// Support Loop Controller, and, if `config.generate_rules`, the
/// Confidence Loop Controller.
pub fn mine<I, T>(config: &MiningConfig, transactions: &[T]) -> Result<Output<I>>
where
    I: Item,
    T: Transaction<I>,
{
    config.validate()?;
    let start = Instant::now();

    log::debug!(
        "mine: {} transactions, min_support={}, max_support={}",
        transactions.len(),
        config.min_support,
        config.max_support
    );

    let support_result = run_support_loop(
        transactions,
        config.min_support,
        config.max_support,
        config.support_delta,
        config.frequent_item_set_count,
    )?;

    let (rules, effective_min_confidence, effective_max_confidence) = if config.generate_rules {
        let confidence_result = run_confidence_loop(
            &support_result.result,
            config.min_confidence,
            config.max_confidence,
            config.confidence_delta,
            config.rule_count,
        );
        log::debug!(
            "mine: generated {} rules at effective min_confidence={}",
            confidence_result.rules.len(),
            confidence_result.effective_min_confidence
        );
        (
            RuleSet::new(confidence_result.rules),
            confidence_result.effective_min_confidence,
            config.max_confidence,
        )
    } else {
        (RuleSet::new(Vec::new()), config.min_confidence, config.max_confidence)
    };

    Ok(Output {
        frequent_item_sets: support_result.result,
        rules,
        elapsed_secs: start.elapsed().as_secs_f64(),
        effective_min_support: support_result.effective_min_support,
        effective_max_support: config.max_support,
        effective_min_confidence,
        effective_max_confidence,
    })
}
