//! Match statistics
//!
//! This module turns raw match records into per-player statistics and the
//! derived views built on them: year options, the leaderboard and the
//! day-by-day match history.

pub mod aggregator;
pub mod history;
pub mod leaderboard;
pub mod years;

// Re-export commonly used functions
pub use aggregator::{aggregate_statistics, forward_fill_dates, parse_match_date};
pub use history::group_by_date;
pub use leaderboard::{filter_by_roster, leaderboard};
pub use years::{
    available_years, max_matches_played, min_matches_options, smart_min_matches_default,
    year_options, YearOptions,
};
