//! Team balancing
//!
//! This module splits a scored selection into two even teams: goalkeeper
//! seeding, high-low pairing with greedy assignment, then a bounded local
//! swap search.

pub mod balancer;
pub mod optimizer;

// Re-export commonly used types
pub use balancer::{balance_teams, compare_by_score, TeamBalancer};
pub use optimizer::{optimize_swaps, score_difference, SwapOutcome};
