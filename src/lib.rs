//! Adaptive Apriori frequent-item-set and association-rule mining.
//!
//! `mine` is the single entry point: give it a [`MiningConfig`] and a
//! slice of [`Transaction`] implementors, get back an [`Output`] holding
//! the frequent item sets and, optionally, a ranked [`RuleSet`].
//!
//! ```
//! use apriori_miner::{mine, MiningConfig, SimpleTransaction};
//!
//! let transactions = vec![
//!     SimpleTransaction::new(vec!["bread", "milk"]),
//!     SimpleTransaction::new(vec!["bread", "diapers"]),
//!     SimpleTransaction::new(vec!["milk", "diapers"]),
//! ];
//! let config = MiningConfig {
//!     min_support: 0.5,
//!     ..Default::default()
//! };
//! let output = mine(&config, &transactions).unwrap();
//! assert!(!output.frequent_item_sets().is_empty());
//! ```

pub mod config;
pub mod driver;
pub mod errors;
pub mod item;
pub mod item_set;
pub mod metrics;
pub mod mining;
pub mod rule_set;
pub mod transaction;

pub use config::MiningConfig;
pub use driver::{mine, Output};
pub use errors::{MiningError, Result};
pub use item::{Item, TimeInterval};
pub use item_set::ItemSet;
pub use metrics::{
    ByMetric, ConfidenceMetric, ConvictionMetric, LeverageMetric, LiftMetric, Metric,
    RuleComparator, SupportMetric, ThenBy,
};
pub use mining::rules::AssociationRule;
pub use rule_set::RuleSet;
pub use transaction::{SimpleTransaction, Transaction};
