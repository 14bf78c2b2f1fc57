//! Player selection state
//!
//! The set of players picked for the next match, their goalkeeper flags and
//! any guests. The selection is a plain value owned by the caller; every
//! change is validated and a rejected change leaves it untouched.

use crate::error::{BalancerError, Result};
use crate::types::{
    GuestPlayer, PlayerKind, PlayerName, SelectedPlayer, StatisticsMap, MAX_GOALKEEPERS,
};
use serde::{Deserialize, Serialize};

/// Parse a guest estimate typed in by a user
pub fn parse_estimate(name: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| BalancerError::OutOfRangeEstimate {
            name: name.to_string(),
            value: raw.to_string(),
        })?;
    validate_estimate(name, value)?;
    Ok(value)
}

fn validate_estimate(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(BalancerError::OutOfRangeEstimate {
            name: name.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Players chosen for the next match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected names in the order they were picked
    players: Vec<PlayerName>,
    goalkeepers: Vec<PlayerName>,
    guests: Vec<GuestPlayer>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &[PlayerName] {
        &self.players
    }

    pub fn goalkeepers(&self) -> &[PlayerName] {
        &self.goalkeepers
    }

    pub fn guests(&self) -> &[GuestPlayer] {
        &self.guests
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    pub fn is_goalkeeper(&self, name: &str) -> bool {
        self.goalkeepers.iter().any(|g| g == name)
    }

    fn guest(&self, name: &str) -> Option<&GuestPlayer> {
        self.guests.iter().find(|g| g.name == name)
    }

    /// Pick a known player or guest. Selecting twice is harmless.
    pub fn select(&mut self, name: &str, stats: &StatisticsMap) -> Result<()> {
        if !stats.contains_key(name) && self.guest(name).is_none() {
            return Err(BalancerError::PlayerNotFound {
                name: name.to_string(),
            }
            .into());
        }

        if !self.is_selected(name) {
            self.players.push(name.to_string());
        }
        Ok(())
    }

    /// Drop a player from the selection, clearing their goalkeeper flag
    pub fn deselect(&mut self, name: &str) -> Result<()> {
        if !self.is_selected(name) {
            return Err(BalancerError::PlayerNotSelected {
                name: name.to_string(),
            }
            .into());
        }

        self.players.retain(|p| p != name);
        self.goalkeepers.retain(|g| g != name);
        Ok(())
    }

    /// Add a guest and select them.
    ///
    /// The name must not match a player with statistics or another guest, and
    /// the estimate must lie in `0..=100`.
    pub fn add_guest(&mut self, name: &str, estimate: f64, stats: &StatisticsMap) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BalancerError::InvalidName {
                name: name.to_string(),
            }
            .into());
        }
        if stats.contains_key(name) || self.guest(name).is_some() {
            return Err(BalancerError::DuplicateName {
                name: name.to_string(),
            }
            .into());
        }
        validate_estimate(name, estimate)?;

        self.guests.push(GuestPlayer {
            name: name.to_string(),
            estimated_percentage: estimate,
        });
        self.players.push(name.to_string());
        Ok(())
    }

    /// Remove a guest entirely, including from the selection
    pub fn remove_guest(&mut self, name: &str) -> Result<()> {
        if self.guest(name).is_none() {
            return Err(BalancerError::PlayerNotFound {
                name: name.to_string(),
            }
            .into());
        }

        self.guests.retain(|g| g.name != name);
        self.players.retain(|p| p != name);
        self.goalkeepers.retain(|g| g != name);
        Ok(())
    }

    /// Flag or unflag a selected player as goalkeeper.
    ///
    /// At most two goalkeepers may be flagged; a third is rejected.
    pub fn set_goalkeeper(&mut self, name: &str, is_goalkeeper: bool) -> Result<()> {
        if !self.is_selected(name) {
            return Err(BalancerError::PlayerNotSelected {
                name: name.to_string(),
            }
            .into());
        }

        if !is_goalkeeper {
            self.goalkeepers.retain(|g| g != name);
            return Ok(());
        }

        if self.is_goalkeeper(name) {
            return Ok(());
        }
        if self.goalkeepers.len() >= MAX_GOALKEEPERS {
            return Err(BalancerError::GoalkeeperLimitExceeded {
                limit: MAX_GOALKEEPERS,
            }
            .into());
        }

        self.goalkeepers.push(name.to_string());
        Ok(())
    }

    /// Check the selection has exactly the number of players required
    pub fn ensure_size(&self, required: usize) -> Result<()> {
        if self.players.len() != required {
            return Err(BalancerError::InvalidSelection {
                selected: self.players.len(),
                required,
            }
            .into());
        }
        Ok(())
    }

    /// Resolve the selection against current statistics
    pub fn candidates(&self, stats: &StatisticsMap) -> Result<Vec<SelectedPlayer>> {
        self.players
            .iter()
            .map(|name| {
                let kind = if let Some(guest) = self.guest(name) {
                    PlayerKind::Guest(guest.clone())
                } else if let Some(player) = stats.get(name) {
                    PlayerKind::Regular(player.clone())
                } else {
                    return Err(anyhow::Error::from(BalancerError::PlayerNotFound {
                        name: name.clone(),
                    }));
                };

                Ok(SelectedPlayer {
                    kind,
                    is_goalkeeper: self.is_goalkeeper(name),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::as_balancer_error;
    use crate::types::PlayerStatistics;

    fn stats(names: &[&str]) -> StatisticsMap {
        names
            .iter()
            .map(|name| {
                let mut player = PlayerStatistics::new(name);
                player.wins = 1;
                player.total_matches = 2;
                (name.to_string(), player)
            })
            .collect()
    }

    fn kind_of(err: &anyhow::Error) -> BalancerError {
        as_balancer_error(err).cloned().expect("typed error")
    }

    #[test]
    fn test_select_and_deselect() {
        let known = stats(&["Ana", "Beto"]);
        let mut selection = Selection::new();

        selection.select("Ana", &known).unwrap();
        selection.select("Ana", &known).unwrap();
        assert_eq!(selection.len(), 1);

        let err = selection.select("Nobody", &known).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::PlayerNotFound { .. }));

        selection.set_goalkeeper("Ana", true).unwrap();
        selection.deselect("Ana").unwrap();
        assert!(selection.is_empty());
        assert!(selection.goalkeepers().is_empty());

        let err = selection.deselect("Ana").unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::PlayerNotSelected { .. }));
    }

    #[test]
    fn test_goalkeeper_limit() {
        let known = stats(&["A", "B", "C"]);
        let mut selection = Selection::new();
        for name in ["A", "B", "C"] {
            selection.select(name, &known).unwrap();
        }

        selection.set_goalkeeper("A", true).unwrap();
        selection.set_goalkeeper("B", true).unwrap();
        selection.set_goalkeeper("B", true).unwrap();

        let err = selection.set_goalkeeper("C", true).unwrap_err();
        assert_eq!(
            kind_of(&err),
            BalancerError::GoalkeeperLimitExceeded { limit: 2 }
        );
        assert_eq!(selection.goalkeepers(), &["A".to_string(), "B".to_string()]);

        selection.set_goalkeeper("A", false).unwrap();
        selection.set_goalkeeper("C", true).unwrap();
        assert!(selection.is_goalkeeper("C"));
    }

    #[test]
    fn test_goalkeeper_must_be_selected() {
        let mut selection = Selection::new();
        let err = selection.set_goalkeeper("Ghost", true).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::PlayerNotSelected { .. }));
    }

    #[test]
    fn test_add_guest() {
        let known = stats(&["Ana"]);
        let mut selection = Selection::new();

        selection.add_guest("Visitor", 60.0, &known).unwrap();
        assert!(selection.is_selected("Visitor"));
        assert_eq!(selection.guests().len(), 1);

        let err = selection.add_guest("Ana", 50.0, &known).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::DuplicateName { .. }));

        let err = selection.add_guest("Visitor", 50.0, &known).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::DuplicateName { .. }));

        let err = selection.add_guest("Other", 101.0, &known).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::OutOfRangeEstimate { .. }));

        let err = selection.add_guest("   ", 50.0, &known).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::InvalidName { .. }));

        assert_eq!(selection.guests().len(), 1);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_guest() {
        let known = stats(&[]);
        let mut selection = Selection::new();
        selection.add_guest("Visitor", 40.0, &known).unwrap();
        selection.set_goalkeeper("Visitor", true).unwrap();

        selection.remove_guest("Visitor").unwrap();
        assert!(selection.is_empty());
        assert!(selection.goalkeepers().is_empty());
        assert!(selection.remove_guest("Visitor").is_err());
    }

    #[test]
    fn test_parse_estimate() {
        assert_eq!(parse_estimate("G", " 75 ").unwrap(), 75.0);
        assert_eq!(parse_estimate("G", "0").unwrap(), 0.0);
        assert!(parse_estimate("G", "abc").is_err());
        assert!(parse_estimate("G", "-1").is_err());
        assert!(parse_estimate("G", "NaN").is_err());
    }

    #[test]
    fn test_ensure_size() {
        let known = stats(&["A", "B"]);
        let mut selection = Selection::new();
        selection.select("A", &known).unwrap();

        let err = selection.ensure_size(2).unwrap_err();
        assert_eq!(
            kind_of(&err),
            BalancerError::InvalidSelection {
                selected: 1,
                required: 2
            }
        );

        selection.select("B", &known).unwrap();
        assert!(selection.ensure_size(2).is_ok());
    }

    #[test]
    fn test_candidates() {
        let known = stats(&["A", "B"]);
        let mut selection = Selection::new();
        selection.select("B", &known).unwrap();
        selection.add_guest("G", 30.0, &known).unwrap();
        selection.set_goalkeeper("B", true).unwrap();

        let candidates = selection.candidates(&known).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(matches!(candidates[0].kind, PlayerKind::Regular(_)));
        assert!(candidates[0].is_goalkeeper);
        assert!(matches!(candidates[1].kind, PlayerKind::Guest(_)));

        // Statistics rebuilt without B no longer resolve the selection
        let err = selection.candidates(&stats(&["A"])).unwrap_err();
        assert!(matches!(kind_of(&err), BalancerError::PlayerNotFound { .. }));
    }
}
