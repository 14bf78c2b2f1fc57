//! Rating signal weights
//!
//! A player's blended score mixes three signals: overall win percentage,
//! current-year win percentage and recent form. Each signal has a weight and
//! can be switched off; the enabled weights are always re-normalized so they
//! sum to one.

use crate::error::{BalancerError, Result};
use serde::{Deserialize, Serialize};

/// The three signals blended into a player's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Overall,
    CurrentYear,
    Form,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Overall => write!(f, "overall"),
            Signal::CurrentYear => write!(f, "current year"),
            Signal::Form => write!(f, "form"),
        }
    }
}

/// Configured weights and on/off switches for each signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub overall_weight: f64,
    pub overall_enabled: bool,
    pub current_year_weight: f64,
    pub current_year_enabled: bool,
    pub form_weight: f64,
    pub form_enabled: bool,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            overall_weight: 0.5,
            overall_enabled: true,
            current_year_weight: 0.3,
            current_year_enabled: true,
            form_weight: 0.2,
            form_enabled: true,
        }
    }
}

/// Effective weights after normalization; always sums to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeights {
    pub overall: f64,
    pub current_year: f64,
    pub form: f64,
}

impl NormalizedWeights {
    pub fn sum(&self) -> f64 {
        self.overall + self.current_year + self.form
    }
}

impl SignalWeights {
    pub fn is_enabled(&self, signal: Signal) -> bool {
        match signal {
            Signal::Overall => self.overall_enabled,
            Signal::CurrentYear => self.current_year_enabled,
            Signal::Form => self.form_enabled,
        }
    }

    pub fn enabled_count(&self) -> usize {
        [self.overall_enabled, self.current_year_enabled, self.form_enabled]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }

    /// Switch a signal on or off.
    ///
    /// Turning off the last enabled signal is rejected and leaves the weights
    /// exactly as they were.
    pub fn set_enabled(&mut self, signal: Signal, enabled: bool) -> Result<()> {
        if !enabled && self.is_enabled(signal) && self.enabled_count() == 1 {
            return Err(BalancerError::LastSignalDisabled {
                signal: signal.to_string(),
            }
            .into());
        }

        match signal {
            Signal::Overall => self.overall_enabled = enabled,
            Signal::CurrentYear => self.current_year_enabled = enabled,
            Signal::Form => self.form_enabled = enabled,
        }
        Ok(())
    }

    /// Change the raw weight of one signal
    pub fn set_weight(&mut self, signal: Signal, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(BalancerError::ConfigurationError {
                message: format!("{} weight must be a non-negative number", signal),
            }
            .into());
        }

        match signal {
            Signal::Overall => self.overall_weight = weight,
            Signal::CurrentYear => self.current_year_weight = weight,
            Signal::Form => self.form_weight = weight,
        }
        Ok(())
    }

    /// Scale the enabled weights so they sum to one.
    ///
    /// With nothing enabled the overall signal is used alone; enabled weights
    /// that sum to zero share the total equally.
    pub fn normalized(&self) -> NormalizedWeights {
        if self.enabled_count() == 0 {
            return NormalizedWeights {
                overall: 1.0,
                current_year: 0.0,
                form: 0.0,
            };
        }

        let pick = |enabled: bool, weight: f64| if enabled { weight.max(0.0) } else { 0.0 };
        let overall = pick(self.overall_enabled, self.overall_weight);
        let current_year = pick(self.current_year_enabled, self.current_year_weight);
        let form = pick(self.form_enabled, self.form_weight);
        let total = overall + current_year + form;

        if total <= 0.0 {
            let share = 1.0 / self.enabled_count() as f64;
            let equal = |enabled: bool| if enabled { share } else { 0.0 };
            return NormalizedWeights {
                overall: equal(self.overall_enabled),
                current_year: equal(self.current_year_enabled),
                form: equal(self.form_enabled),
            };
        }

        NormalizedWeights {
            overall: overall / total,
            current_year: current_year / total,
            form: form / total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::as_balancer_error;

    #[test]
    fn test_default_weights_normalize_to_one() {
        let weights = SignalWeights::default().normalized();
        assert!((weights.sum() - 1.0).abs() < 1e-12);
        assert!((weights.overall - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_disabled_signal_is_excluded() {
        let mut weights = SignalWeights::default();
        weights.set_enabled(Signal::Form, false).unwrap();

        let normalized = weights.normalized();
        assert_eq!(normalized.form, 0.0);
        assert!((normalized.overall - 0.625).abs() < 1e-12);
        assert!((normalized.current_year - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_disabling_last_signal_is_rejected() {
        let mut weights = SignalWeights::default();
        weights.set_enabled(Signal::Overall, false).unwrap();
        weights.set_enabled(Signal::CurrentYear, false).unwrap();
        let before = weights.clone();

        let err = weights.set_enabled(Signal::Form, false).unwrap_err();
        assert!(matches!(
            as_balancer_error(&err),
            Some(BalancerError::LastSignalDisabled { .. })
        ));
        assert_eq!(weights, before);
        assert!((weights.normalized().form - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_nothing_enabled_falls_back_to_overall() {
        let weights = SignalWeights {
            overall_enabled: false,
            current_year_enabled: false,
            form_enabled: false,
            ..Default::default()
        };
        let normalized = weights.normalized();
        assert_eq!(normalized.overall, 1.0);
        assert_eq!(normalized.sum(), 1.0);
    }

    #[test]
    fn test_zero_weights_share_equally() {
        let weights = SignalWeights {
            overall_weight: 0.0,
            current_year_weight: 0.0,
            form_weight: 0.0,
            form_enabled: false,
            ..Default::default()
        };
        let normalized = weights.normalized();
        assert_eq!(normalized.overall, 0.5);
        assert_eq!(normalized.current_year, 0.5);
        assert_eq!(normalized.form, 0.0);
    }

    #[test]
    fn test_set_weight_rejects_negative() {
        let mut weights = SignalWeights::default();
        assert!(weights.set_weight(Signal::Form, -1.0).is_err());
        assert!(weights.set_weight(Signal::Form, f64::NAN).is_err());
        weights.set_weight(Signal::Form, 0.7).unwrap();
        assert_eq!(weights.form_weight, 0.7);
    }

    #[test]
    fn test_reenabling_is_allowed() {
        let mut weights = SignalWeights::default();
        weights.set_enabled(Signal::Overall, false).unwrap();
        weights.set_enabled(Signal::Overall, true).unwrap();
        assert_eq!(weights.enabled_count(), 3);
    }
}
