//! Scheduled matches.

use std::fmt;

use super::entity::{Localization, Player, Timeslot};
use super::team::Team;
use crate::error::{CourtForgeError, Result};

/// A match reconstructed from a solved schedule.
///
/// A match occupies its localization from `start` through `end`, both
/// inclusive, for `duration` consecutive timeslots of its event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    players: Vec<Player>,
    localization: Localization,
    start: Timeslot,
    end: Timeslot,
    duration: usize,
    teams: Vec<Team>,
}

impl Match {
    /// Creates a match.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if there are no players, a player repeats,
    /// the duration is zero or `end` precedes `start`.
    pub fn new(
        players: Vec<Player>,
        localization: Localization,
        start: Timeslot,
        end: Timeslot,
        duration: usize,
    ) -> Result<Self> {
        if players.is_empty() {
            return Err(CourtForgeError::invalid("a match needs players"));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(CourtForgeError::invalid(format!(
                    "player {player} appears twice in the same match"
                )));
            }
        }
        if duration == 0 {
            return Err(CourtForgeError::invalid("match duration must be positive"));
        }
        if end < start {
            return Err(CourtForgeError::invalid(format!(
                "match ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self {
            players,
            localization,
            start,
            end,
            duration,
            teams: Vec::new(),
        })
    }

    /// Attaches the teams playing the match.
    pub fn with_teams(mut self, teams: Vec<Team>) -> Self {
        self.teams = teams;
        self
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    #[inline]
    pub fn start(&self) -> &Timeslot {
        &self.start
    }

    #[inline]
    pub fn end(&self) -> &Timeslot {
        &self.end
    }

    #[inline]
    pub fn duration(&self) -> usize {
        self.duration
    }

    #[inline]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn involves(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    pub fn involves_team(&self, team: &Team) -> bool {
        self.teams.contains(team)
    }

    /// Returns true if `timeslot` lies within `start..=end`.
    pub fn spans(&self, timeslot: &Timeslot) -> bool {
        &self.start <= timeslot && timeslot <= &self.end
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<String> = if self.teams.is_empty() {
            self.players.iter().map(|p| p.name().to_string()).collect()
        } else {
            self.teams.iter().map(|t| t.name().to_string()).collect()
        };
        write!(
            f,
            "[{}] at {} from {} to {}",
            sides.join(" vs "),
            self.localization,
            self.start,
            self.end
        )
    }
}
