//! Predefined matchups and the modes that govern how often players meet.

use std::fmt;

use super::entity::{Localization, Player, Timeslot};
use crate::error::{CourtForgeError, Result};

/// How often the same players may meet across an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchupMode {
    /// Two players (or teams) never meet more than once.
    AllDifferent,
    /// Players who meet once meet in every one of their matches.
    AllEqual,
    /// No restriction; predefined matchups occur between once and
    /// `matches_per_player` times.
    #[default]
    Any,
    /// Predefined matchups occur exactly their declared number of times.
    Custom,
}

impl fmt::Display for MatchupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchupMode::AllDifferent => write!(f, "AllDifferent"),
            MatchupMode::AllEqual => write!(f, "AllEqual"),
            MatchupMode::Any => write!(f, "Any"),
            MatchupMode::Custom => write!(f, "Custom"),
        }
    }
}

/// A set of players that must be scheduled against each other.
///
/// Empty localization or timeslot sets mean "anywhere" and "any time".
///
/// # Examples
///
/// ```
/// use courtforge_core::{Matchup, Player, Timeslot};
///
/// let matchup = Matchup::new(vec![Player::new("Ann"), Player::new("Bob")])
///     .unwrap()
///     .with_timeslots(vec![Timeslot::generic(0)])
///     .with_occurrences(1)
///     .unwrap();
///
/// assert_eq!(matchup.players().len(), 2);
/// assert!(matchup.localizations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matchup {
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    occurrences: usize,
}

impl Matchup {
    /// Creates a matchup between the given players, once, anywhere, any time.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no players are given or a player repeats.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        if players.is_empty() {
            return Err(CourtForgeError::invalid("a matchup needs players"));
        }
        for (i, player) in players.iter().enumerate() {
            if players[..i].contains(player) {
                return Err(CourtForgeError::invalid(format!(
                    "matchup lists player {player} more than once"
                )));
            }
        }
        Ok(Self {
            players,
            localizations: Vec::new(),
            timeslots: Vec::new(),
            occurrences: 1,
        })
    }

    /// Restricts where the matchup can take place.
    pub fn with_localizations(mut self, mut localizations: Vec<Localization>) -> Self {
        dedup_in_order(&mut localizations);
        self.localizations = localizations;
        self
    }

    /// Restricts when the matchup can begin.
    pub fn with_timeslots(mut self, mut timeslots: Vec<Timeslot>) -> Self {
        dedup_in_order(&mut timeslots);
        self.timeslots = timeslots;
        self
    }

    /// Sets how many times the matchup must happen.
    pub fn with_occurrences(mut self, occurrences: usize) -> Result<Self> {
        if occurrences == 0 {
            return Err(CourtForgeError::invalid(
                "matchup occurrences must be at least 1",
            ));
        }
        self.occurrences = occurrences;
        Ok(self)
    }

    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[inline]
    pub fn localizations(&self) -> &[Localization] {
        &self.localizations
    }

    #[inline]
    pub fn timeslots(&self) -> &[Timeslot] {
        &self.timeslots
    }

    #[inline]
    pub fn occurrences(&self) -> usize {
        self.occurrences
    }

    pub fn involves(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    /// Same players regardless of order.
    pub fn has_same_players(&self, other: &Matchup) -> bool {
        self.players.len() == other.players.len()
            && self.players.iter().all(|p| other.players.contains(p))
    }
}

fn dedup_in_order<T: PartialEq>(items: &mut Vec<T>) {
    let mut i = 0;
    while i < items.len() {
        if items[..i].contains(&items[i]) {
            items.remove(i);
        } else {
            i += 1;
        }
    }
}
