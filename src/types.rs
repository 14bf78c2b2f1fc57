//! Common types used throughout the team balancing engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player names double as identifiers
pub type PlayerName = String;

/// Per-player statistics keyed by name
pub type StatisticsMap = BTreeMap<PlayerName, PlayerStatistics>;

/// Number of recent results kept as a player's form
pub const FORM_LENGTH: usize = 5;

/// Maximum number of goalkeepers in a selection (one per team)
pub const MAX_GOALKEEPERS: usize = 2;

/// A single recorded match: one winner, one loser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub date: Option<NaiveDate>,
    pub winner: PlayerName,
    pub loser: PlayerName,
}

impl MatchOutcome {
    pub fn new(date: Option<NaiveDate>, winner: &str, loser: &str) -> Self {
        Self {
            date,
            winner: winner.to_string(),
            loser: loser.to_string(),
        }
    }

    /// Year of the match, if dated
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.date.map(|d| d.year())
    }
}

/// An unvalidated match row as handed over by a data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatchRow {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub loser: Option<String>,
}

/// Result of one match from a player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormResult {
    Win,
    Loss,
}

impl FormResult {
    /// Value used by the form signal: 100 for a win, 0 for a loss
    pub fn value(self) -> f64 {
        match self {
            FormResult::Win => 100.0,
            FormResult::Loss => 0.0,
        }
    }
}

impl std::fmt::Display for FormResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormResult::Win => write!(f, "W"),
            FormResult::Loss => write!(f, "L"),
        }
    }
}

/// Aggregated match statistics for one player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub name: PlayerName,
    pub wins: u32,
    pub total_matches: u32,
    pub current_year_wins: u32,
    pub current_year_total: u32,
    /// Most recent result first, at most [`FORM_LENGTH`] entries
    pub recent_form: Vec<FormResult>,
}

impl PlayerStatistics {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Overall win percentage, 0 when no matches were played
    pub fn win_percentage(&self) -> f64 {
        percentage(self.wins, self.total_matches).unwrap_or(0.0)
    }

    /// Win percentage within the selected year, `None` without matches that year
    pub fn current_year_percentage(&self) -> Option<f64> {
        percentage(self.current_year_wins, self.current_year_total)
    }
}

fn percentage(wins: u32, total: u32) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(wins as f64 / total as f64 * 100.0)
    }
}

/// A participant with no match history, rated by a manual estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestPlayer {
    pub name: PlayerName,
    /// Estimated win percentage in `0..=100`
    pub estimated_percentage: f64,
}

/// Either a player with recorded statistics or a guest with an estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerKind {
    Regular(PlayerStatistics),
    Guest(GuestPlayer),
}

impl PlayerKind {
    pub fn name(&self) -> &str {
        match self {
            PlayerKind::Regular(stats) => &stats.name,
            PlayerKind::Guest(guest) => &guest.name,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, PlayerKind::Guest(_))
    }

    /// Win percentage for regulars, the estimate for guests
    pub fn raw_score(&self) -> f64 {
        match self {
            PlayerKind::Regular(stats) => stats.win_percentage(),
            PlayerKind::Guest(guest) => guest.estimated_percentage,
        }
    }
}

/// Shared view over anything that can be fed to the balancer
pub trait Scoreable {
    fn name(&self) -> &str;
    fn raw_score(&self) -> f64;
    fn is_goalkeeper(&self) -> bool;
    fn is_guest(&self) -> bool;
}

/// A player picked for the next match, with their goalkeeper flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    pub kind: PlayerKind,
    pub is_goalkeeper: bool,
}

impl Scoreable for SelectedPlayer {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn raw_score(&self) -> f64 {
        self.kind.raw_score()
    }

    fn is_goalkeeper(&self) -> bool {
        self.is_goalkeeper
    }

    fn is_guest(&self) -> bool {
        self.kind.is_guest()
    }
}

/// Balancer input: a player with a final comparable score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlayer {
    pub name: PlayerName,
    pub is_goalkeeper: bool,
    pub is_guest: bool,
    /// Win percentage or guest estimate, `0..=100`
    pub raw_score: f64,
    /// Final blended (regular) or scaled (guest) score
    pub score: f64,
}

impl ScoredPlayer {
    pub fn new(name: &str, score: f64) -> Self {
        Self {
            name: name.to_string(),
            is_goalkeeper: false,
            is_guest: false,
            raw_score: score,
            score,
        }
    }

    pub fn goalkeeper(mut self) -> Self {
        self.is_goalkeeper = true;
        self
    }
}

impl Scoreable for ScoredPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn raw_score(&self) -> f64 {
        self.raw_score
    }

    fn is_goalkeeper(&self) -> bool {
        self.is_goalkeeper
    }

    fn is_guest(&self) -> bool {
        self.is_guest
    }
}

/// One side of a generated match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: Vec<ScoredPlayer>,
}

impl Team {
    pub fn total(&self) -> f64 {
        self.players.iter().map(|p| p.score).sum()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn goalkeepers(&self) -> impl Iterator<Item = &ScoredPlayer> {
        self.players.iter().filter(|p| p.is_goalkeeper)
    }
}

/// Qualitative label for a score difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceQuality {
    Good,
    Acceptable,
    Poor,
}

impl std::fmt::Display for BalanceQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceQuality::Good => write!(f, "good"),
            BalanceQuality::Acceptable => write!(f, "acceptable"),
            BalanceQuality::Poor => write!(f, "poor"),
        }
    }
}

/// Two balanced teams plus a summary of how even they are
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub team1: Team,
    pub team2: Team,
    /// Absolute difference of team totals
    pub difference: f64,
    pub quality: BalanceQuality,
    /// Swaps performed by the local search
    pub swaps: usize,
    /// Full scans run by the local search
    pub iterations: usize,
}

/// A ranked row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub name: PlayerName,
    pub wins: u32,
    pub total: u32,
    pub percentage: f64,
    pub recent_form: Vec<FormResult>,
}

/// All matches played on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDay {
    pub date: Option<NaiveDate>,
    pub matches: Vec<MatchOutcome>,
}
