//! Year selection helpers
//!
//! Decides which years are worth offering as the "current year" view and
//! suggests a sensible minimum-matches filter for the leaderboard.

use crate::config::YearSettings;
use crate::types::MatchOutcome;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Upper bound for the minimum-matches choices
pub const MAX_MIN_MATCHES_OPTION: u32 = 50;

/// Step between minimum-matches choices
pub const MIN_MATCHES_STEP: u32 = 5;

/// Years offered for the current-year view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOptions {
    /// Newest first
    pub offered: Vec<i32>,
    pub default_year: Option<i32>,
}

/// Distinct years present in the outcome dates, newest first
pub fn available_years(outcomes: &[MatchOutcome]) -> Vec<i32> {
    let years: BTreeSet<i32> = outcomes.iter().filter_map(MatchOutcome::year).collect();
    years.into_iter().rev().collect()
}

/// Number of matches dated in `year`
pub fn matches_in_year(outcomes: &[MatchOutcome], year: i32) -> usize {
    outcomes.iter().filter(|o| o.year() == Some(year)).count()
}

/// Work out which years to offer.
///
/// The newest year is always offered when it has a match. The year before is
/// added only while the newest year is still thin and the previous one has
/// enough matches to mean something; in that case it is also the default.
pub fn year_options(outcomes: &[MatchOutcome], settings: &YearSettings) -> YearOptions {
    let Some(&latest) = available_years(outcomes).first() else {
        return YearOptions::default();
    };

    let latest_count = matches_in_year(outcomes, latest);
    let previous = latest - 1;
    let previous_count = matches_in_year(outcomes, previous);

    if latest_count < settings.min_current_year_matches
        && previous_count >= settings.min_matches_for_year_option
    {
        YearOptions {
            offered: vec![latest, previous],
            default_year: Some(previous),
        }
    } else {
        YearOptions {
            offered: vec![latest],
            default_year: Some(latest),
        }
    }
}

/// Most matches played by a single player, optionally within one year
pub fn max_matches_played(outcomes: &[MatchOutcome], year_filter: Option<i32>) -> u32 {
    let mut counts: HashMap<&str, u32> = HashMap::new();

    for outcome in outcomes {
        if year_filter.is_some() && outcome.year() != year_filter {
            continue;
        }
        for name in [outcome.winner.trim(), outcome.loser.trim()] {
            if !name.is_empty() {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
    }

    counts.values().copied().max().unwrap_or(0)
}

/// Largest multiple of five not above half of `max_matches`
pub fn smart_min_matches_default(max_matches: u32) -> u32 {
    (max_matches / 2) / MIN_MATCHES_STEP * MIN_MATCHES_STEP
}

/// Choices for the minimum-matches filter: 0, 5, 10, ... up to the cap
pub fn min_matches_options(max_matches: u32) -> Vec<u32> {
    let upper = max_matches.min(MAX_MIN_MATCHES_OPTION);
    (0..=upper).step_by(MIN_MATCHES_STEP as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn matches(year: i32, count: usize) -> Vec<MatchOutcome> {
        (0..count)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(year, 1 + (i % 12) as u32, 1);
                MatchOutcome::new(date, "A", "B")
            })
            .collect()
    }

    #[test]
    fn test_available_years() {
        let mut outcomes = matches(2022, 1);
        outcomes.extend(matches(2024, 2));
        outcomes.push(MatchOutcome::new(None, "A", "B"));
        outcomes.extend(matches(2023, 1));

        assert_eq!(available_years(&outcomes), vec![2024, 2023, 2022]);
        assert!(available_years(&[]).is_empty());
    }

    #[test]
    fn test_year_options_established_year() {
        let mut outcomes = matches(2023, 20);
        outcomes.extend(matches(2024, 5));

        let options = year_options(&outcomes, &YearSettings::default());
        assert_eq!(options.offered, vec![2024]);
        assert_eq!(options.default_year, Some(2024));
    }

    #[test]
    fn test_year_options_early_season() {
        let mut outcomes = matches(2023, 6);
        outcomes.extend(matches(2024, 4));

        let options = year_options(&outcomes, &YearSettings::default());
        assert_eq!(options.offered, vec![2024, 2023]);
        assert_eq!(options.default_year, Some(2023));
    }

    #[test]
    fn test_year_options_thin_previous_year() {
        let mut outcomes = matches(2023, 5);
        outcomes.extend(matches(2024, 1));

        let options = year_options(&outcomes, &YearSettings::default());
        assert_eq!(options.offered, vec![2024]);
    }

    #[test]
    fn test_year_options_without_dates() {
        let outcomes = vec![MatchOutcome::new(None, "A", "B")];
        assert_eq!(
            year_options(&outcomes, &YearSettings::default()),
            YearOptions::default()
        );
    }

    #[test]
    fn test_max_matches_played() {
        let mut outcomes = matches(2023, 3);
        outcomes.push(MatchOutcome::new(
            NaiveDate::from_ymd_opt(2024, 5, 1),
            "C",
            "A",
        ));

        assert_eq!(max_matches_played(&outcomes, None), 4);
        assert_eq!(max_matches_played(&outcomes, Some(2024)), 1);
        assert_eq!(max_matches_played(&outcomes, Some(1999)), 0);
    }

    #[test]
    fn test_smart_min_matches_default() {
        assert_eq!(smart_min_matches_default(0), 0);
        assert_eq!(smart_min_matches_default(9), 0);
        assert_eq!(smart_min_matches_default(10), 5);
        assert_eq!(smart_min_matches_default(25), 10);
        assert_eq!(smart_min_matches_default(42), 20);
    }

    #[test]
    fn test_min_matches_options() {
        assert_eq!(min_matches_options(0), vec![0]);
        assert_eq!(min_matches_options(12), vec![0, 5, 10]);
        assert_eq!(min_matches_options(200).last(), Some(&50));
    }
}
