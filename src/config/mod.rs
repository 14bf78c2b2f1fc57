//! Configuration management for the team balancing engine
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod balance;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, SelectionSettings, ServiceSettings, YearSettings};
pub use balance::BalanceConfig;
pub use rating::RatingConfig;
