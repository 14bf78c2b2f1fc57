//! Error types for the team balancing engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Callers that need to react to a specific rejection can
//! downcast to [`BalancerError`].

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific selection and balancing scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BalancerError {
    #[error("Invalid selection: {selected} players selected, {required} required")]
    InvalidSelection { selected: usize, required: usize },

    #[error("Duplicate player name: {name}")]
    DuplicateName { name: String },

    #[error("Estimate out of range for {name}: {value} (expected 0-100)")]
    OutOfRangeEstimate { name: String, value: String },

    #[error("Goalkeeper limit exceeded: at most {limit} goalkeepers allowed")]
    GoalkeeperLimitExceeded { limit: usize },

    #[error("Invalid player name: '{name}'")]
    InvalidName { name: String },

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("Player is not selected: {name}")]
    PlayerNotSelected { name: String },

    #[error("Cannot disable {signal}: at least one rating signal must stay enabled")]
    LastSignalDisabled { signal: String },

    #[error("Invalid match date: {value}")]
    InvalidDate { value: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

/// Extract the typed error from an `anyhow::Error`, if it is one of ours
pub fn as_balancer_error(error: &anyhow::Error) -> Option<&BalancerError> {
    error.downcast_ref::<BalancerError>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_roundtrip() {
        let err: anyhow::Error = BalancerError::GoalkeeperLimitExceeded { limit: 2 }.into();
        assert_eq!(
            as_balancer_error(&err),
            Some(&BalancerError::GoalkeeperLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = BalancerError::InvalidSelection {
            selected: 9,
            required: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid selection: 9 players selected, 10 required"
        );

        let other = anyhow::anyhow!("plain failure");
        assert!(as_balancer_error(&other).is_none());
    }
}
