//! Leaderboard ranking
//!
//! Ranks players by win percentage over an optional year, hiding players
//! who have not yet played enough matches.

use crate::stats::aggregator::aggregate_statistics;
use crate::types::{LeaderboardEntry, MatchOutcome};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Build the leaderboard.
///
/// Only outcomes dated in `year_filter` count (all outcomes when `None`).
/// Rows are ordered by percentage, then wins, then matches played, all
/// descending; the name breaks any remaining tie.
pub fn leaderboard(
    outcomes: &[MatchOutcome],
    year_filter: Option<i32>,
    min_matches: u32,
) -> Vec<LeaderboardEntry> {
    let scoped: Vec<MatchOutcome> = match year_filter {
        Some(year) => outcomes
            .iter()
            .filter(|o| o.year() == Some(year))
            .cloned()
            .collect(),
        None => outcomes.to_vec(),
    };

    let mut rows: Vec<LeaderboardEntry> = aggregate_statistics(&scoped, None)
        .into_values()
        .filter(|stats| stats.total_matches >= min_matches)
        .map(|stats| LeaderboardEntry {
            position: 0,
            percentage: stats.win_percentage(),
            name: stats.name,
            wins: stats.wins,
            total: stats.total_matches,
            recent_form: stats.recent_form,
        })
        .collect();

    rows.sort_by(compare_entries);
    for (index, row) in rows.iter_mut().enumerate() {
        row.position = index + 1;
    }
    rows
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.percentage
        .total_cmp(&a.percentage)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.total.cmp(&a.total))
        .then_with(|| a.name.cmp(&b.name))
}

/// Keep outcomes where the winner or the loser is on the roster
pub fn filter_by_roster(outcomes: &[MatchOutcome], roster: &HashSet<String>) -> Vec<MatchOutcome> {
    outcomes
        .iter()
        .filter(|o| roster.contains(o.winner.trim()) || roster.contains(o.loser.trim()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on(year: i32, winner: &str, loser: &str) -> MatchOutcome {
        MatchOutcome::new(NaiveDate::from_ymd_opt(year, 6, 1), winner, loser)
    }

    #[test]
    fn test_ordering_and_positions() {
        let outcomes = vec![
            on(2024, "A", "B"),
            on(2024, "A", "C"),
            on(2024, "C", "B"),
            on(2024, "D", "B"),
        ];

        let board = leaderboard(&outcomes, None, 0);
        let names: Vec<_> = board.iter().map(|e| e.name.as_str()).collect();
        // A and D are both at 100%; A has more wins
        assert_eq!(names, vec!["A", "D", "C", "B"]);
        assert_eq!(board[0].position, 1);
        assert_eq!(board[3].position, 4);
        assert_eq!(board[3].percentage, 0.0);
    }

    #[test]
    fn test_min_matches_filter() {
        let outcomes = vec![on(2024, "A", "B"), on(2024, "A", "B"), on(2024, "C", "A")];
        let board = leaderboard(&outcomes, None, 2);
        let names: Vec<_> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_year_filter() {
        let outcomes = vec![on(2023, "A", "B"), on(2024, "B", "A")];

        let board = leaderboard(&outcomes, Some(2024), 0);
        assert_eq!(board[0].name, "B");
        assert_eq!(board[0].total, 1);

        let all = leaderboard(&outcomes, None, 0);
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|e| e.total == 2));
    }

    #[test]
    fn test_filter_by_roster() {
        let outcomes = vec![on(2024, "A", "X"), on(2024, "Y", "Z"), on(2024, "W", "B")];
        let roster: HashSet<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();

        let kept = filter_by_roster(&outcomes, &roster);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].winner, "W");
    }
}
