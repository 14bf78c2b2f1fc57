//! Pickup Teams - player scoring and team balancing for pick-up matches
//!
//! This crate aggregates match results into player statistics, rates players
//! with weighted signals and confidence shrinkage, and splits a selection into
//! two even teams with goalkeeper seeding and a local swap search.

pub mod balance;
pub mod config;
pub mod error;
pub mod rating;
pub mod selection;
pub mod service;
pub mod stats;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancerError, Result};
pub use types::*;

// Re-export key components
pub use balance::{balance_teams, TeamBalancer};
pub use rating::RatingCalculator;
pub use selection::Selection;
pub use service::TeamService;
pub use stats::aggregate_statistics;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
