//! Teams: groups of players that always play together.

use std::fmt;

use super::entity::Player;
use crate::error::{CourtForgeError, Result};

/// A named group of players that share every match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    name: String,
    players: Vec<Player>,
}

impl Team {
    /// Creates a team.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the team has fewer than two players or
    /// lists a player twice.
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Result<Self> {
        let name = name.into();
        if players.len() < 2 {
            return Err(CourtForgeError::invalid(format!(
                "team {name} must contain at least two players"
            )));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(CourtForgeError::invalid(format!(
                    "team {name} lists player {player} more than once"
                )));
            }
        }
        Ok(Self { name, players })
    }

    /// Creates a team named after its players, e.g. `"Ann-Bob"`.
    pub fn of(players: Vec<Player>) -> Result<Self> {
        let name = players
            .iter()
            .map(Player::name)
            .collect::<Vec<_>>()
            .join("-");
        Self::new(name, players)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.players.len()
    }

    pub fn contains(&self, player: &Player) -> bool {
        self.players.contains(player)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
