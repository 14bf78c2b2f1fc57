//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use pickup_teams::types::{MatchOutcome, RawMatchRow, ScoredPlayer};

pub fn date(day: u32, month: u32, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// `count` wins of `winner` over `loser`, all on one day
pub fn repeat(day: Option<NaiveDate>, winner: &str, loser: &str, count: usize) -> Vec<MatchOutcome> {
    (0..count)
        .map(|_| MatchOutcome::new(day, winner, loser))
        .collect()
}

/// Scored outfield players from `(name, score)` pairs
pub fn scored(scores: &[(&str, f64)]) -> Vec<ScoredPlayer> {
    scores
        .iter()
        .map(|(name, score)| ScoredPlayer::new(name, *score))
        .collect()
}

pub fn league_names() -> Vec<String> {
    (1..=12).map(|i| format!("P{:02}", i)).collect()
}

/// A season of `count` matches among the league players.
///
/// Lower-numbered players usually win; every fourth match is an upset.
/// Dates move forward through the year.
pub fn season(year: i32, count: usize) -> Vec<MatchOutcome> {
    let names = league_names();
    (0..count)
        .map(|k| {
            let i = (k * 7) % names.len();
            let mut j = (k * 5 + 3) % names.len();
            if i == j {
                j = (j + 1) % names.len();
            }
            let (strong, weak) = if i < j { (i, j) } else { (j, i) };
            let (winner, loser) = if k % 4 == 0 { (weak, strong) } else { (strong, weak) };

            let month = 1 + ((k / 4) % 12) as u32;
            let day = 1 + (k % 4) as u32 * 7;
            MatchOutcome::new(date(day, month, year), &names[winner], &names[loser])
        })
        .collect()
}

/// Two seasons: a full 2023 and a 2024 with `matches_2024` matches so far
pub fn league(matches_2024: usize) -> Vec<MatchOutcome> {
    let mut outcomes = season(2023, 60);
    outcomes.extend(season(2024, matches_2024));
    outcomes
}

/// Match rows as they come out of a match sheet
pub const SAMPLE_ROWS_JSON: &str = r#"[
    {"date": "03/02/2024", "winner": "A", "loser": "B"},
    {"winner": "A", "loser": "B"},
    {"date": "", "winner": " C ", "loser": "A"},
    {"date": "10/02/2024", "winner": "", "loser": ""},
    {"winner": "B", "loser": "C"}
]"#;

pub fn sample_rows() -> Vec<RawMatchRow> {
    serde_json::from_str(SAMPLE_ROWS_JSON).expect("sample rows parse")
}
