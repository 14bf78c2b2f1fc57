//! Team service
//!
//! Wires aggregation, rating and balancing together behind one value built
//! from an [`AppConfig`]. The service holds no match data; every call takes
//! the outcomes it works on.

use crate::balance::TeamBalancer;
use crate::config::{validate_config, AppConfig};
use crate::error::Result;
use crate::rating::RatingCalculator;
use crate::selection::Selection;
use crate::stats::{aggregate_statistics, leaderboard, year_options, YearOptions};
use crate::types::{BalanceResult, LeaderboardEntry, MatchOutcome, StatisticsMap};
use std::time::Instant;
use tracing::{debug, info};

/// Facade over the statistics, rating and balancing components
#[derive(Debug, Clone)]
pub struct TeamService {
    config: AppConfig,
    calculator: RatingCalculator,
    balancer: TeamBalancer,
}

impl TeamService {
    /// Build the service from a configuration, validating it first
    pub fn new(config: AppConfig) -> Result<Self> {
        validate_config(&config)?;

        let calculator = RatingCalculator::new(config.rating.clone())?;
        let balancer = TeamBalancer::new(config.balance.clone())?;

        info!(
            "Initialized {} (players required: {}, max iterations: {})",
            config.service.name, config.selection.players_required, config.balance.max_iterations
        );

        Ok(Self {
            config,
            calculator,
            balancer,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn calculator(&self) -> &RatingCalculator {
        &self.calculator
    }

    /// Which years to offer as the current-year view
    pub fn year_options(&self, outcomes: &[MatchOutcome]) -> YearOptions {
        year_options(outcomes, &self.config.years)
    }

    /// The requested year, or the default year offered for these outcomes
    pub fn resolve_year(&self, outcomes: &[MatchOutcome], year: Option<i32>) -> Option<i32> {
        year.or_else(|| self.year_options(outcomes).default_year)
    }

    /// Per-player statistics with year counters scoped to `year`
    pub fn statistics(&self, outcomes: &[MatchOutcome], year: Option<i32>) -> StatisticsMap {
        aggregate_statistics(outcomes, self.resolve_year(outcomes, year))
    }

    pub fn leaderboard(
        &self,
        outcomes: &[MatchOutcome],
        year_filter: Option<i32>,
        min_matches: u32,
    ) -> Vec<LeaderboardEntry> {
        let rows = leaderboard(outcomes, year_filter, min_matches);
        debug!(
            "Leaderboard for {:?} with at least {} matches: {} rows",
            year_filter,
            min_matches,
            rows.len()
        );
        rows
    }

    /// Split the selection into two balanced teams.
    ///
    /// The selection must hold exactly `players_required` players. Statistics
    /// are rebuilt from `outcomes` with the year counters scoped to `year`
    /// (or the default offered year when `None`).
    pub fn generate_teams(
        &self,
        outcomes: &[MatchOutcome],
        selection: &Selection,
        year: Option<i32>,
    ) -> Result<BalanceResult> {
        let start_time = Instant::now();

        selection.ensure_size(self.config.selection.players_required)?;

        let year = self.resolve_year(outcomes, year);
        let stats = aggregate_statistics(outcomes, year);
        let candidates = selection.candidates(&stats)?;
        let scored = self.calculator.score_selection(&candidates);
        let result = self.balancer.balance(&scored)?;

        info!(
            "Generated teams for {} players (year {:?}): {:.2} vs {:.2}, difference {:.2} ({}), {} swaps, time: {:.2}ms",
            scored.len(),
            year,
            result.team1.total(),
            result.team2.total(),
            result.difference,
            result.quality,
            result.swaps,
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(result)
    }
}
