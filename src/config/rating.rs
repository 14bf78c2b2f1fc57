//! Rating system configuration

use crate::error::{BalancerError, Result};
use crate::rating::weights::SignalWeights;
use crate::types::FORM_LENGTH;
use serde::{Deserialize, Serialize};

/// Parameters of the player rating calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Blend weights for the overall, current-year and form signals
    pub weights: SignalWeights,
    /// Weights for the last results, most recent first
    pub form_weights: [f64; FORM_LENGTH],
    /// Matches needed before a player's own score is fully trusted
    pub min_matches_for_confidence: u32,
    /// Nominal confidence attached to guest estimates
    pub guest_confidence: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            weights: SignalWeights::default(),
            form_weights: [0.30, 0.25, 0.20, 0.15, 0.10],
            min_matches_for_confidence: 10,
            guest_confidence: 0.6,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let weights = [
            self.weights.overall_weight,
            self.weights.current_year_weight,
            self.weights.form_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(BalancerError::ConfigurationError {
                message: "Signal weights must be non-negative numbers".to_string(),
            }
            .into());
        }

        if self.weights.enabled_count() == 0 {
            return Err(BalancerError::ConfigurationError {
                message: "At least one rating signal must be enabled".to_string(),
            }
            .into());
        }

        if self.form_weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(BalancerError::ConfigurationError {
                message: "Form weights must be positive".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.guest_confidence) {
            return Err(BalancerError::ConfigurationError {
                message: "Guest confidence must be between 0 and 1".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RatingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = RatingConfig::default();
        config.form_weights[4] = 0.0;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.guest_confidence = 1.5;
        assert!(config.validate().is_err());

        let mut config = RatingConfig::default();
        config.weights.overall_enabled = false;
        config.weights.current_year_enabled = false;
        config.weights.form_enabled = false;
        assert!(config.validate().is_err());
    }
}
