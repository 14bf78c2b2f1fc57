//! Local swap search
//!
//! Refines an initial split by swapping outfield players across teams while
//! each swap narrows the score gap by more than a small epsilon.

use crate::config::BalanceConfig;
use crate::types::ScoredPlayer;
use crate::utils::total_difference;
use tracing::debug;

/// What the swap search did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    pub swaps: usize,
    pub iterations: usize,
}

fn total(team: &[ScoredPlayer]) -> f64 {
    team.iter().map(|p| p.score).sum()
}

/// Absolute gap between two teams' totals
pub fn score_difference(team1: &[ScoredPlayer], team2: &[ScoredPlayer]) -> f64 {
    total_difference(total(team1), total(team2))
}

/// Swap outfield players between the teams until no swap helps.
///
/// Each iteration scans every cross-team pair of non-goalkeepers and applies
/// any swap that shrinks the gap by more than `improvement_epsilon`. Stops
/// after a scan without swaps or after `max_iterations` scans. Team sizes and
/// goalkeepers never change.
pub fn optimize_swaps(
    team1: &mut [ScoredPlayer],
    team2: &mut [ScoredPlayer],
    config: &BalanceConfig,
) -> SwapOutcome {
    let mut outcome = SwapOutcome::default();

    while outcome.iterations < config.max_iterations {
        outcome.iterations += 1;
        let mut gap = total(team1) - total(team2);
        let mut improved = false;

        for i in 0..team1.len() {
            if team1[i].is_goalkeeper {
                continue;
            }
            for j in 0..team2.len() {
                if team2[j].is_goalkeeper {
                    continue;
                }

                let delta = team1[i].score - team2[j].score;
                let new_gap = gap - 2.0 * delta;
                if gap.abs() - new_gap.abs() > config.improvement_epsilon {
                    std::mem::swap(&mut team1[i], &mut team2[j]);
                    gap = new_gap;
                    outcome.swaps += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    debug!(
        "Swap search finished after {} iterations with {} swaps",
        outcome.iterations, outcome.swaps
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(scores: &[(&str, f64)]) -> Vec<ScoredPlayer> {
        scores
            .iter()
            .map(|(name, score)| ScoredPlayer::new(name, *score))
            .collect()
    }

    #[test]
    fn test_swap_reduces_gap() {
        let mut team1 = team(&[("A", 90.0), ("B", 80.0)]);
        let mut team2 = team(&[("C", 20.0), ("D", 10.0)]);
        let before = score_difference(&team1, &team2);

        let outcome = optimize_swaps(&mut team1, &mut team2, &BalanceConfig::default());

        let after = score_difference(&team1, &team2);
        assert!(after < before);
        assert!(outcome.swaps >= 1);
        assert_eq!(team1.len(), 2);
        assert_eq!(team2.len(), 2);
    }

    #[test]
    fn test_goalkeepers_never_move() {
        let mut team1 = vec![ScoredPlayer::new("Keeper", 95.0).goalkeeper()];
        team1.extend(team(&[("A", 10.0)]));
        let mut team2 = vec![ScoredPlayer::new("Other", 5.0).goalkeeper()];
        team2.extend(team(&[("B", 12.0)]));

        optimize_swaps(&mut team1, &mut team2, &BalanceConfig::default());

        assert!(team1.iter().any(|p| p.name == "Keeper"));
        assert!(team2.iter().any(|p| p.name == "Other"));
    }

    #[test]
    fn test_balanced_teams_stop_after_one_scan() {
        let mut team1 = team(&[("A", 50.0), ("B", 40.0)]);
        let mut team2 = team(&[("C", 45.0), ("D", 45.0)]);

        let outcome = optimize_swaps(&mut team1, &mut team2, &BalanceConfig::default());
        assert_eq!(outcome, SwapOutcome { swaps: 0, iterations: 1 });
    }

    #[test]
    fn test_tiny_gains_are_ignored() {
        let mut team1 = team(&[("A", 50.004)]);
        let mut team2 = team(&[("B", 50.0)]);

        let outcome = optimize_swaps(&mut team1, &mut team2, &BalanceConfig::default());
        assert_eq!(outcome.swaps, 0);
        assert_eq!(team1[0].name, "A");
    }

    #[test]
    fn test_iteration_cap() {
        let config = BalanceConfig {
            max_iterations: 0,
            ..Default::default()
        };
        let mut team1 = team(&[("A", 90.0)]);
        let mut team2 = team(&[("B", 10.0)]);

        let outcome = optimize_swaps(&mut team1, &mut team2, &config);
        assert_eq!(outcome, SwapOutcome::default());
        assert_eq!(team1[0].name, "A");
    }
}
