//! Match statistics aggregation
//!
//! Reduces a chronological list of match outcomes into per-player win/loss
//! counts, a year-scoped subset and each player's recent form.

use crate::error::{BalancerError, Result};
use crate::types::{
    FormResult, MatchOutcome, PlayerStatistics, RawMatchRow, StatisticsMap, FORM_LENGTH,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Date format used by match sheets
pub const MATCH_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `DD/MM/YYYY` match date
pub fn parse_match_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), MATCH_DATE_FORMAT).map_err(|_| {
        anyhow::Error::from(BalancerError::InvalidDate {
            value: value.to_string(),
        })
    })
}

/// Turn raw rows into outcomes.
///
/// Rows without a date inherit the most recent date seen above them, names
/// are trimmed, and rows with neither a winner nor a loser are dropped. A
/// dropped row still updates the carried date.
pub fn forward_fill_dates(rows: &[RawMatchRow]) -> Result<Vec<MatchOutcome>> {
    let mut last_date: Option<NaiveDate> = None;
    let mut outcomes = Vec::with_capacity(rows.len());

    for row in rows {
        if let Some(raw) = row.date.as_deref().filter(|d| !d.trim().is_empty()) {
            last_date = Some(parse_match_date(raw)?);
        }

        let winner = row.winner.as_deref().unwrap_or("").trim();
        let loser = row.loser.as_deref().unwrap_or("").trim();
        if winner.is_empty() && loser.is_empty() {
            continue;
        }

        outcomes.push(MatchOutcome::new(last_date, winner, loser));
    }

    debug!(
        "Normalized {} raw rows into {} match outcomes",
        rows.len(),
        outcomes.len()
    );
    Ok(outcomes)
}

/// Running totals for one player during an aggregation pass
#[derive(Debug, Default)]
struct Tally {
    wins: u32,
    total: u32,
    year_wins: u32,
    year_total: u32,
    history: Vec<FormResult>,
}

impl Tally {
    fn record(&mut self, result: FormResult, in_target_year: bool) {
        let won = result == FormResult::Win;
        self.total += 1;
        if won {
            self.wins += 1;
        }
        if in_target_year {
            self.year_total += 1;
            if won {
                self.year_wins += 1;
            }
        }
        self.history.push(result);
    }

    fn into_statistics(self, name: String) -> PlayerStatistics {
        let recent_form = self.history.iter().rev().take(FORM_LENGTH).copied().collect();
        PlayerStatistics {
            name,
            wins: self.wins,
            total_matches: self.total,
            current_year_wins: self.year_wins,
            current_year_total: self.year_total,
            recent_form,
        }
    }
}

/// Build per-player statistics from outcomes in chronological order.
///
/// Year-scoped counters only count matches dated in `target_year`; with no
/// target year they stay at zero. Players absent from every outcome are not
/// in the result.
pub fn aggregate_statistics(
    outcomes: &[MatchOutcome],
    target_year: Option<i32>,
) -> StatisticsMap {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();

    for outcome in outcomes {
        let in_target_year = target_year.is_some() && outcome.year() == target_year;
        let sides = [
            (outcome.winner.trim(), FormResult::Win),
            (outcome.loser.trim(), FormResult::Loss),
        ];

        for (name, result) in sides {
            if name.is_empty() {
                continue;
            }
            tallies
                .entry(name.to_string())
                .or_default()
                .record(result, in_target_year);
        }
    }

    debug!(
        "Aggregated {} outcomes into statistics for {} players (target year {:?})",
        outcomes.len(),
        tallies.len(),
        target_year
    );

    tallies
        .into_iter()
        .map(|(name, tally)| {
            let stats = tally.into_statistics(name.clone());
            (name, stats)
        })
        .collect()
}
