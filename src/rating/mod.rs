//! Player rating
//!
//! This module turns aggregated statistics and guest estimates into a single
//! comparable score per player, using weighted signals and confidence-based
//! shrinkage toward the group mean.

pub mod calculator;
pub mod weights;

// Re-export commonly used types
pub use calculator::{GroupStats, RatingCalculator, NEUTRAL_SCORE};
pub use weights::{NormalizedWeights, Signal, SignalWeights};
