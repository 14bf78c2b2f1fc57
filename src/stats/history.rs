//! Match history grouped by day

use crate::types::{MatchDay, MatchOutcome};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group outcomes by date, newest day first.
///
/// Matches keep their input order within a day; undated matches form a
/// final group.
pub fn group_by_date(outcomes: &[MatchOutcome]) -> Vec<MatchDay> {
    let mut days: BTreeMap<NaiveDate, Vec<MatchOutcome>> = BTreeMap::new();
    let mut undated = Vec::new();

    for outcome in outcomes {
        match outcome.date {
            Some(date) => days.entry(date).or_default().push(outcome.clone()),
            None => undated.push(outcome.clone()),
        }
    }

    let mut grouped: Vec<MatchDay> = days
        .into_iter()
        .rev()
        .map(|(date, matches)| MatchDay {
            date: Some(date),
            matches,
        })
        .collect();

    if !undated.is_empty() {
        grouped.push(MatchDay {
            date: None,
            matches: undated,
        });
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_date() {
        let early = NaiveDate::from_ymd_opt(2024, 1, 5);
        let late = NaiveDate::from_ymd_opt(2024, 2, 9);
        let outcomes = vec![
            MatchOutcome::new(None, "X", "Y"),
            MatchOutcome::new(early, "A", "B"),
            MatchOutcome::new(late, "C", "D"),
            MatchOutcome::new(early, "E", "F"),
        ];

        let days = group_by_date(&outcomes);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, late);
        assert_eq!(days[1].date, early);
        assert_eq!(days[1].matches[0].winner, "A");
        assert_eq!(days[1].matches[1].winner, "E");
        assert_eq!(days[2].date, None);
    }

    #[test]
    fn test_empty_history() {
        assert!(group_by_date(&[]).is_empty());
    }
}
