//! Team balancer configuration

use crate::error::{BalancerError, Result};
use crate::types::BalanceQuality;
use serde::{Deserialize, Serialize};

/// Tuning for the swap search and the balance labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Upper bound on full swap scans
    pub max_iterations: usize,
    /// A swap must shrink the difference by more than this
    pub improvement_epsilon: f64,
    /// Differences up to this are labelled good
    pub good_threshold: f64,
    /// Differences up to this are labelled acceptable
    pub acceptable_threshold: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            improvement_epsilon: 0.01,
            good_threshold: 5.0,
            acceptable_threshold: 10.0,
        }
    }
}

impl BalanceConfig {
    /// Label a team score difference
    pub fn quality_for(&self, difference: f64) -> BalanceQuality {
        if difference <= self.good_threshold {
            BalanceQuality::Good
        } else if difference <= self.acceptable_threshold {
            BalanceQuality::Acceptable
        } else {
            BalanceQuality::Poor
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.improvement_epsilon < 0.0 || !self.improvement_epsilon.is_finite() {
            return Err(BalancerError::ConfigurationError {
                message: "improvement_epsilon must be non-negative".to_string(),
            }
            .into());
        }

        if self.good_threshold < 0.0 || self.good_threshold > self.acceptable_threshold {
            return Err(BalancerError::ConfigurationError {
                message: "good_threshold must be between 0 and acceptable_threshold".to_string(),
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
    fn test_quality_labels() {
        let config = BalanceConfig::default();
        assert_eq!(config.quality_for(0.0), BalanceQuality::Good);
        assert_eq!(config.quality_for(5.0), BalanceQuality::Good);
        assert_eq!(config.quality_for(7.5), BalanceQuality::Acceptable);
        assert_eq!(config.quality_for(10.0), BalanceQuality::Acceptable);
        assert_eq!(config.quality_for(10.01), BalanceQuality::Poor);
    }

    #[test]
    fn test_validate() {
        assert!(BalanceConfig::default().validate().is_ok());

        let config = BalanceConfig {
            good_threshold: 20.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
