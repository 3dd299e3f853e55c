use crate::errors::{MiningError, Result};
use serde::{Deserialize, Serialize};

/// Mining configuration.
///
/// Thresholds are validated eagerly by [`MiningConfig::validate`], which
/// `driver::mine` calls before doing any work — configuration errors are
/// always surfaced before a single transaction is scanned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Floor for the support relaxation loop. `[0, max_support]`.
    pub min_support: f64,
    /// Initial support threshold. `[min_support, 1]`.
    pub max_support: f64,
    /// Step by which the support loop relaxes the threshold. Must be > 0.
    pub support_delta: f64,
    /// Target item-set count. `0` disables the loop (single run at `min_support`).
    pub frequent_item_set_count: usize,

    /// Whether to derive association rules from the frequent item sets.
    pub generate_rules: bool,
    /// Floor for the confidence relaxation loop. `[0, max_confidence]`.
    pub min_confidence: f64,
    /// Initial confidence threshold. `[min_confidence, 1]`.
    pub max_confidence: f64,
    /// Step by which the confidence loop relaxes the threshold. Must be > 0.
    pub confidence_delta: f64,
    /// Target rule count. `0` disables the loop (single run at `min_confidence`).
    pub rule_count: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.0,
            max_support: 1.0,
            support_delta: 0.1,
            frequent_item_set_count: 0,
            generate_rules: false,
            min_confidence: 0.0,
            max_confidence: 1.0,
            confidence_delta: 0.1,
            rule_count: 0,
        }
    }
}

impl MiningConfig {
    /// Checks every constraint spec.md §6 places on a configuration,
    /// fail-fast, before any mining work starts.
    pub fn validate(&self) -> Result<()> {
        Self::check_unit_range("min_support", self.min_support)?;
        Self::check_unit_range("max_support", self.max_support)?;
        if self.min_support > self.max_support {
            return Err(MiningError::InvalidArgument(format!(
                "min_support ({}) must be <= max_support ({})",
                self.min_support, self.max_support
            )));
        }
        if self.support_delta <= 0.0 {
            return Err(MiningError::InvalidArgument(format!(
                "support_delta must be > 0, got {}",
                self.support_delta
            )));
        }

        Self::check_unit_range("min_confidence", self.min_confidence)?;
        Self::check_unit_range("max_confidence", self.max_confidence)?;
        if self.min_confidence > self.max_confidence {
            return Err(MiningError::InvalidArgument(format!(
                "min_confidence ({}) must be <= max_confidence ({})",
                self.min_confidence, self.max_confidence
            )));
        }
        if self.confidence_delta <= 0.0 {
            return Err(MiningError::InvalidArgument(format!(
                "confidence_delta must be > 0, got {}",
                self.confidence_delta
            )));
        }

        Ok(())
    }

    fn check_unit_range(name: &str, value: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(MiningError::InvalidArgument(format!(
                "{} must be in [0, 1], got {}",
                name, value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MiningConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_min_greater_than_max_support() {
        let config = MiningConfig {
            min_support: 0.9,
            max_support: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MiningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_support_out_of_range() {
        let config = MiningConfig {
            min_support: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MiningConfig {
            max_support: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_delta() {
        let config = MiningConfig {
            support_delta: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = MiningConfig {
            confidence_delta: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_min_greater_than_max_confidence() {
        let config = MiningConfig {
            min_confidence: 0.8,
            max_confidence: 0.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
