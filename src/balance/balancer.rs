//! Two-team balancing
//!
//! Splits scored players into two teams of equal size (one apart for odd
//! counts). Goalkeepers are seeded first, outfield players are paired
//! strongest-with-weakest and handed out greedily, and the swap search then
//! closes whatever gap is left.

use crate::balance::optimizer::optimize_swaps;
use crate::config::BalanceConfig;
use crate::error::{BalancerError, Result};
use crate::types::{BalanceResult, ScoredPlayer, Team, MAX_GOALKEEPERS};
use crate::utils::total_difference;
use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Score descending; the name only makes the order deterministic
pub fn compare_by_score(a: &ScoredPlayer, b: &ScoredPlayer) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Reject inputs the balancer cannot split
fn validate_players(players: &[ScoredPlayer]) -> Result<()> {
    let mut seen = HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(player.name.as_str()) {
            return Err(BalancerError::DuplicateName {
                name: player.name.clone(),
            }
            .into());
        }
    }

    if players.iter().filter(|p| p.is_goalkeeper).count() > MAX_GOALKEEPERS {
        return Err(BalancerError::GoalkeeperLimitExceeded {
            limit: MAX_GOALKEEPERS,
        }
        .into());
    }

    Ok(())
}

/// Running state of the two teams during the greedy pass
#[derive(Debug, Default)]
struct Split {
    team1: Vec<ScoredPlayer>,
    team2: Vec<ScoredPlayer>,
    total1: f64,
    total2: f64,
}

impl Split {
    fn push_team1(&mut self, player: ScoredPlayer) {
        self.total1 += player.score;
        self.team1.push(player);
    }

    fn push_team2(&mut self, player: ScoredPlayer) {
        self.total2 += player.score;
        self.team2.push(player);
    }

    /// Team 1 counts as weaker on equal totals
    fn team1_is_weaker(&self) -> bool {
        self.total1 <= self.total2
    }

    /// Stronger player to the weaker side, partner to the other
    fn assign_pair(&mut self, stronger: ScoredPlayer, weaker: ScoredPlayer) {
        if self.team1_is_weaker() {
            self.push_team1(stronger);
            self.push_team2(weaker);
        } else {
            self.push_team2(stronger);
            self.push_team1(weaker);
        }
    }

    /// The unpaired player goes to the smaller team, or the weaker one when
    /// sizes are level
    fn assign_single(&mut self, player: ScoredPlayer) {
        match self.team1.len().cmp(&self.team2.len()) {
            Ordering::Less => self.push_team1(player),
            Ordering::Greater => self.push_team2(player),
            Ordering::Equal if self.team1_is_weaker() => self.push_team1(player),
            Ordering::Equal => self.push_team2(player),
        }
    }
}

/// Split players into two balanced teams.
///
/// Fails with `DuplicateName` when a name appears twice and with
/// `GoalkeeperLimitExceeded` when more than two goalkeepers are flagged.
/// Identical input always produces identical teams.
pub fn balance_teams(players: &[ScoredPlayer], config: &BalanceConfig) -> Result<BalanceResult> {
    validate_players(players)?;

    let (mut keepers, mut outfield): (Vec<ScoredPlayer>, Vec<ScoredPlayer>) =
        players.iter().cloned().partition(|p| p.is_goalkeeper);
    keepers.sort_by(compare_by_score);
    outfield.sort_by(compare_by_score);

    let mut split = Split::default();

    let mut keepers = keepers.into_iter();
    if let Some(first) = keepers.next() {
        split.push_team1(first);
    }
    if let Some(second) = keepers.next() {
        split.push_team2(second);
    }

    // High-low pairing from both ends of the sorted list
    let mut remaining = VecDeque::from(outfield);
    while remaining.len() >= 2 {
        if let (Some(stronger), Some(weaker)) = (remaining.pop_front(), remaining.pop_back()) {
            split.assign_pair(stronger, weaker);
        }
    }
    if let Some(middle) = remaining.pop_front() {
        split.assign_single(middle);
    }

    debug!(
        "Greedy split: {:.2} vs {:.2} ({} vs {} players)",
        split.total1,
        split.total2,
        split.team1.len(),
        split.team2.len()
    );

    let Split {
        mut team1,
        mut team2,
        ..
    } = split;
    let swaps = optimize_swaps(&mut team1, &mut team2, config);

    team1.sort_by(compare_by_score);
    team2.sort_by(compare_by_score);
    let team1 = Team { players: team1 };
    let team2 = Team { players: team2 };
    let difference = total_difference(team1.total(), team2.total());

    Ok(BalanceResult {
        quality: config.quality_for(difference),
        team1,
        team2,
        difference,
        swaps: swaps.swaps,
        iterations: swaps.iterations,
    })
}

/// Team balancer bound to a validated configuration
#[derive(Debug, Clone, Default)]
pub struct TeamBalancer {
    config: BalanceConfig,
}

impl TeamBalancer {
    pub fn new(config: BalanceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn balance(&self, players: &[ScoredPlayer]) -> Result<BalanceResult> {
        balance_teams(players, &self.config)
    }
}
