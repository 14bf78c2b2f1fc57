//! Player rating calculator
//!
//! Turns aggregated statistics (or a guest's manual estimate) into one score
//! per player. Regular players blend three signals and are pulled toward the
//! group mean while their sample is small; guests are mapped onto the spread
//! of the regular players in the same selection.

use crate::config::RatingConfig;
use crate::error::Result;
use crate::types::{GuestPlayer, PlayerKind, PlayerStatistics, ScoredPlayer, SelectedPlayer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Neutral value used when there is nothing to compare against
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Confidence of a player with no matches at all
const BASE_CONFIDENCE: f64 = 0.5;

/// Spread of the regular players' blended scores in a selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Default for GroupStats {
    fn default() -> Self {
        Self::neutral()
    }
}

impl GroupStats {
    /// `{50, 50, 50}`, used when the selection has no regular players
    pub fn neutral() -> Self {
        Self {
            min: NEUTRAL_SCORE,
            max: NEUTRAL_SCORE,
            avg: NEUTRAL_SCORE,
        }
    }

    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::neutral();
        }

        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = scores.iter().sum::<f64>() / scores.len() as f64;
        Self { min, max, avg }
    }
}

/// Scores players from their statistics using a [`RatingConfig`]
#[derive(Debug, Clone, Default)]
pub struct RatingCalculator {
    config: RatingConfig,
}

impl RatingCalculator {
    /// Create a calculator, validating the configuration
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Weighted average of recent results; 50 with no results
    pub fn form_score(&self, stats: &PlayerStatistics) -> f64 {
        let (weighted, weight_sum) = stats
            .recent_form
            .iter()
            .zip(self.config.form_weights.iter())
            .fold((0.0, 0.0), |(sum, weights), (result, weight)| {
                (sum + result.value() * weight, weights + weight)
            });

        if weight_sum > 0.0 {
            weighted / weight_sum
        } else {
            NEUTRAL_SCORE
        }
    }

    /// Current-year percentage, or the overall one when the year is empty
    pub fn current_year_score(&self, stats: &PlayerStatistics) -> f64 {
        stats
            .current_year_percentage()
            .unwrap_or_else(|| stats.win_percentage())
    }

    /// Blend of the enabled signals before any shrinkage
    pub fn blended_score(&self, stats: &PlayerStatistics) -> f64 {
        let weights = self.config.weights.normalized();
        weights.overall * stats.win_percentage()
            + weights.current_year * self.current_year_score(stats)
            + weights.form * self.form_score(stats)
    }

    /// Trust in a player's own numbers: 0.5 with no matches, rising linearly
    /// to 1.0 at `min_matches_for_confidence`
    pub fn confidence(&self, total_matches: u32) -> f64 {
        let threshold = self.config.min_matches_for_confidence;
        if total_matches >= threshold {
            return 1.0;
        }
        BASE_CONFIDENCE + (1.0 - BASE_CONFIDENCE) * total_matches as f64 / threshold as f64
    }

    /// Nominal confidence of any player kind
    pub fn confidence_for(&self, kind: &PlayerKind) -> f64 {
        match kind {
            PlayerKind::Regular(stats) => self.confidence(stats.total_matches),
            PlayerKind::Guest(_) => self.config.guest_confidence,
        }
    }

    /// Final score of a regular player given the group's mean blended score
    pub fn regular_score(&self, stats: &PlayerStatistics, group_mean: f64) -> f64 {
        let confidence = self.confidence(stats.total_matches);
        self.blended_score(stats) * confidence + group_mean * (1.0 - confidence)
    }

    /// Map a guest estimate onto the regular players' range.
    ///
    /// 0 maps to the minimum, 50 to the average and 100 to the maximum, with
    /// straight lines in between.
    pub fn scale_guest_score(&self, estimate: f64, group: &GroupStats) -> f64 {
        let estimate = estimate.clamp(0.0, 100.0);
        if estimate <= 50.0 {
            group.min + (group.avg - group.min) * (estimate / 50.0)
        } else {
            group.avg + (group.max - group.avg) * ((estimate - 50.0) / 50.0)
        }
    }

    pub fn guest_score(&self, guest: &GuestPlayer, group: &GroupStats) -> f64 {
        self.scale_guest_score(guest.estimated_percentage, group)
    }

    /// Score any player against precomputed group statistics
    pub fn score_player(&self, kind: &PlayerKind, group: &GroupStats) -> f64 {
        match kind {
            PlayerKind::Regular(stats) => self.regular_score(stats, group.avg),
            PlayerKind::Guest(guest) => self.guest_score(guest, group),
        }
    }

    /// Group statistics over the regular players of a selection
    pub fn group_stats(&self, players: &[SelectedPlayer]) -> GroupStats {
        let blended: Vec<f64> = players
            .iter()
            .filter_map(|p| match &p.kind {
                PlayerKind::Regular(stats) => Some(self.blended_score(stats)),
                PlayerKind::Guest(_) => None,
            })
            .collect();
        GroupStats::from_scores(&blended)
    }

    /// Score a whole selection, keeping input order
    pub fn score_selection(&self, players: &[SelectedPlayer]) -> Vec<ScoredPlayer> {
        let group = self.group_stats(players);
        debug!(
            "Scoring {} players against group min {:.2} / avg {:.2} / max {:.2}",
            players.len(),
            group.min,
            group.avg,
            group.max
        );

        players
            .iter()
            .map(|player| ScoredPlayer {
                name: player.kind.name().to_string(),
                is_goalkeeper: player.is_goalkeeper,
                is_guest: player.kind.is_guest(),
                raw_score: player.kind.raw_score(),
                score: self.score_player(&player.kind, &group),
            })
            .collect()
    }
}
