//! Events: one category of a tournament with its own rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::entity::{Localization, Player, Timeslot};
use super::matchup::{Matchup, MatchupMode};
use super::team::Team;
use crate::error::{CourtForgeError, Result};

const DEFAULT_MATCHES_PER_PLAYER: usize = 1;
const DEFAULT_TIMESLOTS_PER_MATCH: usize = 2;
const DEFAULT_PLAYERS_PER_MATCH: usize = 2;

/// One category or division of a tournament.
///
/// Every mutation checks the event's invariants before touching any state,
/// so an `Event` value is always structurally sound. Holistic checks that
/// span several fields live in [`EventValidator`](crate::EventValidator).
///
/// # Examples
///
/// ```
/// use courtforge_core::{localizations, players, timeslots, Event};
///
/// let event = Event::new("Singles", players(8), localizations(2), timeslots(6)).unwrap();
///
/// assert_eq!(event.matches_per_player(), 1);
/// assert_eq!(event.timeslots_per_match(), 2);
/// assert_eq!(event.players_per_match(), 2);
/// assert_eq!(event.number_of_matches(), 4);
/// assert_eq!(event.number_of_occupied_timeslots(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    name: String,
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    matches_per_player: usize,
    timeslots_per_match: usize,
    players_per_match: usize,
    teams: Vec<Team>,
    breaks: BTreeSet<Timeslot>,
    unavailable_players: BTreeMap<Player, BTreeSet<Timeslot>>,
    unavailable_localizations: BTreeMap<Localization, BTreeSet<Timeslot>>,
    players_in_localizations: BTreeMap<Player, BTreeSet<Localization>>,
    players_at_timeslots: BTreeMap<Player, BTreeSet<Timeslot>>,
    predefined_matchups: Vec<Matchup>,
    matchup_mode: MatchupMode,
}

/// Builder for [`Event`]; all invariants are checked in [`EventBuilder::build`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    name: String,
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    matches_per_player: usize,
    timeslots_per_match: usize,
    players_per_match: usize,
    matchup_mode: MatchupMode,
}

impl EventBuilder {
    pub fn players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    pub fn localizations(mut self, localizations: Vec<Localization>) -> Self {
        self.localizations = localizations;
        self
    }

    pub fn timeslots(mut self, timeslots: Vec<Timeslot>) -> Self {
        self.timeslots = timeslots;
        self
    }

    pub fn matches_per_player(mut self, value: usize) -> Self {
        self.matches_per_player = value;
        self
    }

    pub fn timeslots_per_match(mut self, value: usize) -> Self {
        self.timeslots_per_match = value;
        self
    }

    pub fn players_per_match(mut self, value: usize) -> Self {
        self.players_per_match = value;
        self
    }

    pub fn matchup_mode(mut self, mode: MatchupMode) -> Self {
        self.matchup_mode = mode;
        self
    }

    /// Builds the event.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` on an empty or duplicated entity list,
    /// timeslots that are not in strictly increasing chronological order,
    /// a zero count, a player count not divisible by `players_per_match`,
    /// or fewer timeslots than `matches_per_player * timeslots_per_match`.
    pub fn build(self) -> Result<Event> {
        if self.name.trim().is_empty() {
            return Err(CourtForgeError::invalid("event name must not be empty"));
        }
        ensure_unique("player", &self.players)?;
        ensure_unique("localization", &self.localizations)?;
        ensure_unique("timeslot", &self.timeslots)?;
        if self
            .timeslots
            .windows(2)
            .any(|w| w[0].chronological_order() >= w[1].chronological_order())
        {
            return Err(CourtForgeError::invalid(format!(
                "timeslots of event {} must be in strictly increasing chronological order",
                self.name
            )));
        }
        ensure_positive("matches per player", self.matches_per_player)?;
        ensure_positive("timeslots per match", self.timeslots_per_match)?;
        ensure_positive("players per match", self.players_per_match)?;
        check_players_per_match(self.players.len(), self.players_per_match)?;
        check_timeslot_capacity(
            self.timeslots.len(),
            self.matches_per_player,
            self.timeslots_per_match,
        )?;

        Ok(Event {
            name: self.name,
            players: self.players,
            localizations: self.localizations,
            timeslots: self.timeslots,
            matches_per_player: self.matches_per_player,
            timeslots_per_match: self.timeslots_per_match,
            players_per_match: self.players_per_match,
            teams: Vec::new(),
            breaks: BTreeSet::new(),
            unavailable_players: BTreeMap::new(),
            unavailable_localizations: BTreeMap::new(),
            players_in_localizations: BTreeMap::new(),
            players_at_timeslots: BTreeMap::new(),
            predefined_matchups: Vec::new(),
            matchup_mode: self.matchup_mode,
        })
    }
}

impl Event {
    /// Starts building an event with the default match settings.
    pub fn builder(name: impl Into<String>) -> EventBuilder {
        EventBuilder {
            name: name.into(),
            players: Vec::new(),
            localizations: Vec::new(),
            timeslots: Vec::new(),
            matches_per_player: DEFAULT_MATCHES_PER_PLAYER,
            timeslots_per_match: DEFAULT_TIMESLOTS_PER_MATCH,
            players_per_match: DEFAULT_PLAYERS_PER_MATCH,
            matchup_mode: MatchupMode::default(),
        }
    }

    /// Creates an event with one match per player, two timeslots per match
    /// and two players per match.
    pub fn new(
        name: impl Into<String>,
        players: Vec<Player>,
        localizations: Vec<Localization>,
        timeslots: Vec<Timeslot>,
    ) -> Result<Self> {
        Self::builder(name)
            .players(players)
            .localizations(localizations)
            .timeslots(timeslots)
            .build()
    }

    // ---- accessors ----

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
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
    pub fn matches_per_player(&self) -> usize {
        self.matches_per_player
    }

    #[inline]
    pub fn timeslots_per_match(&self) -> usize {
        self.timeslots_per_match
    }

    #[inline]
    pub fn players_per_match(&self) -> usize {
        self.players_per_match
    }

    #[inline]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    #[inline]
    pub fn breaks(&self) -> &BTreeSet<Timeslot> {
        &self.breaks
    }

    #[inline]
    pub fn unavailable_players(&self) -> &BTreeMap<Player, BTreeSet<Timeslot>> {
        &self.unavailable_players
    }

    #[inline]
    pub fn unavailable_localizations(&self) -> &BTreeMap<Localization, BTreeSet<Timeslot>> {
        &self.unavailable_localizations
    }

    #[inline]
    pub fn players_in_localizations(&self) -> &BTreeMap<Player, BTreeSet<Localization>> {
        &self.players_in_localizations
    }

    #[inline]
    pub fn players_at_timeslots(&self) -> &BTreeMap<Player, BTreeSet<Timeslot>> {
        &self.players_at_timeslots
    }

    #[inline]
    pub fn predefined_matchups(&self) -> &[Matchup] {
        &self.predefined_matchups
    }

    #[inline]
    pub fn matchup_mode(&self) -> MatchupMode {
        self.matchup_mode
    }

    // ---- derived values ----

    /// Number of matches a complete schedule of this event contains.
    pub fn number_of_matches(&self) -> usize {
        self.players.len() / self.players_per_match * self.matches_per_player
    }

    /// Number of (player, timeslot) cells a complete schedule occupies.
    pub fn number_of_occupied_timeslots(&self) -> usize {
        self.number_of_matches() * self.timeslots_per_match
    }

    pub fn has_teams(&self) -> bool {
        !self.teams.is_empty()
    }

    pub fn has_predefined_matchups(&self) -> bool {
        !self.predefined_matchups.is_empty()
    }

    pub fn player_index(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    pub fn localization_index(&self, localization: &Localization) -> Option<usize> {
        self.localizations.iter().position(|l| l == localization)
    }

    pub fn timeslot_index(&self, timeslot: &Timeslot) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }

    pub fn contains_player(&self, player: &Player) -> bool {
        self.players.contains(player)
    }

    pub fn contains_localization(&self, localization: &Localization) -> bool {
        self.localizations.contains(localization)
    }

    pub fn contains_timeslot(&self, timeslot: &Timeslot) -> bool {
        self.timeslots.contains(timeslot)
    }

    /// Team the player belongs to, looked up from the team list.
    pub fn team_of(&self, player: &Player) -> Option<&Team> {
        self.teams.iter().find(|team| team.contains(player))
    }

    pub fn is_break(&self, timeslot: &Timeslot) -> bool {
        self.breaks.contains(timeslot)
    }

    pub fn is_player_unavailable(&self, player: &Player, timeslot: &Timeslot) -> bool {
        self.unavailable_players
            .get(player)
            .is_some_and(|slots| slots.contains(timeslot))
    }

    pub fn is_localization_unavailable(
        &self,
        localization: &Localization,
        timeslot: &Timeslot,
    ) -> bool {
        self.unavailable_localizations
            .get(localization)
            .is_some_and(|slots| slots.contains(timeslot))
    }

    /// Returns false if the player is restricted to a set of timeslots that
    /// does not include `timeslot`.
    pub fn is_player_allowed_at(&self, player: &Player, timeslot: &Timeslot) -> bool {
        self.players_at_timeslots
            .get(player)
            .map_or(true, |slots| slots.contains(timeslot))
    }

    /// Returns false if the player is restricted to a set of localizations
    /// that does not include `localization`.
    pub fn is_player_allowed_in(&self, player: &Player, localization: &Localization) -> bool {
        self.players_in_localizations
            .get(player)
            .map_or(true, |courts| courts.contains(localization))
    }

    // ---- match settings ----

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero or the timeslots cannot
    /// hold that many matches.
    pub fn set_matches_per_player(&mut self, value: usize) -> Result<()> {
        ensure_positive("matches per player", value)?;
        check_timeslot_capacity(self.timeslots.len(), value, self.timeslots_per_match)?;
        self.matches_per_player = value;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero or the timeslots cannot
    /// hold matches that long.
    pub fn set_timeslots_per_match(&mut self, value: usize) -> Result<()> {
        ensure_positive("timeslots per match", value)?;
        check_timeslot_capacity(self.timeslots.len(), self.matches_per_player, value)?;
        self.timeslots_per_match = value;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is zero, does not divide the
    /// player count, is not a multiple of the team size, or differs from
    /// the size of a predefined matchup.
    pub fn set_players_per_match(&mut self, value: usize) -> Result<()> {
        ensure_positive("players per match", value)?;
        check_players_per_match(self.players.len(), value)?;
        if let Some(team) = self.teams.first() {
            if value % team.size() != 0 {
                return Err(CourtForgeError::invalid(format!(
                    "players per match ({value}) must be a multiple of the team size ({})",
                    team.size()
                )));
            }
        }
        if let Some(matchup) = self
            .predefined_matchups
            .iter()
            .find(|m| m.players().len() != value)
        {
            return Err(CourtForgeError::invalid(format!(
                "players per match ({value}) conflicts with a predefined matchup of {} players",
                matchup.players().len()
            )));
        }
        self.players_per_match = value;
        Ok(())
    }

    pub fn set_matchup_mode(&mut self, mode: MatchupMode) {
        self.matchup_mode = mode;
    }

    // ---- teams ----

    /// Adds a team.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a member is not a player of the event or
    /// already in another team, if the team size differs from the existing
    /// teams, or if it does not divide `players_per_match`.
    pub fn add_team(&mut self, team: Team) -> Result<()> {
        for player in team.players() {
            self.require_player(player)?;
            if let Some(other) = self.team_of(player) {
                return Err(CourtForgeError::invalid(format!(
                    "player {player} already belongs to team {other}"
                )));
            }
        }
        if let Some(first) = self.teams.first() {
            if first.size() != team.size() {
                return Err(CourtForgeError::invalid(format!(
                    "team {team} has {} players but teams of event {} have {}",
                    team.size(),
                    self.name,
                    first.size()
                )));
            }
        }
        if self.players_per_match % team.size() != 0 {
            return Err(CourtForgeError::invalid(format!(
                "team size {} does not divide players per match ({})",
                team.size(),
                self.players_per_match
            )));
        }
        if self.teams.iter().any(|t| t.name() == team.name()) {
            return Err(CourtForgeError::invalid(format!(
                "event {} already has a team named {team}",
                self.name
            )));
        }
        self.teams.push(team);
        Ok(())
    }

    /// Replaces all teams; nothing changes if any team is rejected.
    pub fn set_teams(&mut self, teams: Vec<Team>) -> Result<()> {
        let previous = std::mem::take(&mut self.teams);
        for team in teams {
            if let Err(err) = self.add_team(team) {
                self.teams = previous;
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn clear_teams(&mut self) {
        self.teams.clear();
    }

    // ---- predefined matchups ----

    /// Adds a predefined matchup.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the matchup size differs from
    /// `players_per_match` or it references entities outside the event.
    pub fn add_matchup(&mut self, matchup: Matchup) -> Result<()> {
        if matchup.players().len() != self.players_per_match {
            return Err(CourtForgeError::invalid(format!(
                "matchup of {} players does not match players per match ({})",
                matchup.players().len(),
                self.players_per_match
            )));
        }
        for player in matchup.players() {
            self.require_player(player)?;
        }
        for localization in matchup.localizations() {
            self.require_localization(localization)?;
        }
        for timeslot in matchup.timeslots() {
            self.require_timeslot(timeslot)?;
        }
        self.predefined_matchups.push(matchup);
        Ok(())
    }

    pub fn clear_matchups(&mut self) {
        self.predefined_matchups.clear();
    }

    // ---- breaks ----

    pub fn add_break(&mut self, timeslot: &Timeslot) -> Result<()> {
        self.require_timeslot(timeslot)?;
        self.breaks.insert(timeslot.clone());
        Ok(())
    }

    /// Marks every timeslot of the event within `from..=to` as a break.
    pub fn add_break_range(&mut self, from: &Timeslot, to: &Timeslot) -> Result<()> {
        let range = self.timeslot_range(from, to)?;
        self.breaks.extend(range);
        Ok(())
    }

    /// Returns true if the timeslot was a break.
    pub fn remove_break(&mut self, timeslot: &Timeslot) -> bool {
        self.breaks.remove(timeslot)
    }

    // ---- unavailability ----

    pub fn add_unavailable_player(&mut self, player: &Player, timeslot: &Timeslot) -> Result<()> {
        self.add_unavailable_player_at_timeslots(player, std::slice::from_ref(timeslot))
    }

    pub fn add_unavailable_player_at_timeslots(
        &mut self,
        player: &Player,
        timeslots: &[Timeslot],
    ) -> Result<()> {
        self.require_player(player)?;
        for timeslot in timeslots {
            self.require_timeslot(timeslot)?;
        }
        self.unavailable_players
            .entry(player.clone())
            .or_default()
            .extend(timeslots.iter().cloned());
        Ok(())
    }

    /// Marks the player unavailable at every timeslot within `from..=to`.
    pub fn add_unavailable_player_in_range(
        &mut self,
        player: &Player,
        from: &Timeslot,
        to: &Timeslot,
    ) -> Result<()> {
        let range = self.timeslot_range(from, to)?;
        self.add_unavailable_player_at_timeslots(player, &range)
    }

    pub fn add_unavailable_localization(
        &mut self,
        localization: &Localization,
        timeslot: &Timeslot,
    ) -> Result<()> {
        self.add_unavailable_localization_at_timeslots(localization, std::slice::from_ref(timeslot))
    }

    pub fn add_unavailable_localization_at_timeslots(
        &mut self,
        localization: &Localization,
        timeslots: &[Timeslot],
    ) -> Result<()> {
        self.require_localization(localization)?;
        for timeslot in timeslots {
            self.require_timeslot(timeslot)?;
        }
        self.unavailable_localizations
            .entry(localization.clone())
            .or_default()
            .extend(timeslots.iter().cloned());
        Ok(())
    }

    // ---- per-player restrictions ----

    /// Restricts the player to the localizations added this way.
    pub fn add_player_in_localization(
        &mut self,
        player: &Player,
        localization: &Localization,
    ) -> Result<()> {
        self.require_player(player)?;
        self.require_localization(localization)?;
        self.players_in_localizations
            .entry(player.clone())
            .or_default()
            .insert(localization.clone());
        Ok(())
    }

    /// Restricts the timeslots at which the player's matches may begin.
    pub fn add_player_at_timeslot(&mut self, player: &Player, timeslot: &Timeslot) -> Result<()> {
        self.require_player(player)?;
        self.require_timeslot(timeslot)?;
        self.players_at_timeslots
            .entry(player.clone())
            .or_default()
            .insert(timeslot.clone());
        Ok(())
    }

    pub fn add_player_at_timeslots(&mut self, player: &Player, timeslots: &[Timeslot]) -> Result<()> {
        for timeslot in timeslots {
            self.add_player_at_timeslot(player, timeslot)?;
        }
        Ok(())
    }

    // ---- helpers ----

    fn timeslot_range(&self, from: &Timeslot, to: &Timeslot) -> Result<Vec<Timeslot>> {
        let start = self.require_timeslot(from)?;
        let end = self.require_timeslot(to)?;
        if start > end {
            return Err(CourtForgeError::invalid(format!(
                "timeslot range {from}..{to} is reversed"
            )));
        }
        Ok(self.timeslots[start..=end].to_vec())
    }

    fn require_player(&self, player: &Player) -> Result<usize> {
        self.player_index(player).ok_or_else(|| {
            CourtForgeError::invalid(format!(
                "player {player} is not part of event {}",
                self.name
            ))
        })
    }

    fn require_localization(&self, localization: &Localization) -> Result<usize> {
        self.localization_index(localization).ok_or_else(|| {
            CourtForgeError::invalid(format!(
                "localization {localization} is not part of event {}",
                self.name
            ))
        })
    }

    fn require_timeslot(&self, timeslot: &Timeslot) -> Result<usize> {
        self.timeslot_index(timeslot).ok_or_else(|| {
            CourtForgeError::invalid(format!(
                "timeslot {timeslot} is not part of event {}",
                self.name
            ))
        })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} players, {} localizations, {} timeslots)",
            self.name,
            self.players.len(),
            self.localizations.len(),
            self.timeslots.len()
        )
    }
}

fn ensure_unique<T: PartialEq + fmt::Display>(kind: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(CourtForgeError::invalid(format!(
            "an event needs at least one {kind}"
        )));
    }
    for (i, item) in items.iter().enumerate() {
        if items[..i].contains(item) {
            return Err(CourtForgeError::invalid(format!("duplicate {kind} {item}")));
        }
    }
    Ok(())
}

fn ensure_positive(what: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(CourtForgeError::invalid(format!(
            "{what} must be at least 1"
        )));
    }
    Ok(())
}

fn check_players_per_match(players: usize, players_per_match: usize) -> Result<()> {
    if players % players_per_match != 0 {
        return Err(CourtForgeError::invalid(format!(
            "{players} players cannot be split into matches of {players_per_match}"
        )));
    }
    Ok(())
}

fn check_timeslot_capacity(
    timeslots: usize,
    matches_per_player: usize,
    timeslots_per_match: usize,
) -> Result<()> {
    let needed = matches_per_player * timeslots_per_match;
    if timeslots < needed {
        return Err(CourtForgeError::invalid(format!(
            "{timeslots} timeslots cannot hold {matches_per_player} matches of {timeslots_per_match} timeslots"
        )));
    }
    Ok(())
}
