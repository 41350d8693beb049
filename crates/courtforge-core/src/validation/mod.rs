//! Holistic validation run before solving.
//!
//! Validators never mutate what they check. Messages are kept in the order
//! the problems were found and are reset on every call to `validate`.

use std::collections::BTreeSet;

use crate::domain::{Event, MatchupMode};

#[cfg(test)]
mod tests;

/// Cross-field checks over a subject.
pub trait Validator<T: ?Sized> {
    /// Returns true if the subject passes every check.
    fn validate(&mut self, subject: &T) -> bool;

    /// Messages collected by the last call to [`Validator::validate`].
    fn messages(&self) -> &[String];
}

/// Validates a single event.
#[derive(Debug, Default, Clone)]
pub struct EventValidator {
    messages: Vec<String>,
}

impl EventValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_player_availability(&mut self, event: &Event) {
        let needed = event.matches_per_player() * event.timeslots_per_match();
        for player in event.players() {
            let available = event
                .timeslots()
                .iter()
                .filter(|t| !event.is_break(t) && !event.is_player_unavailable(player, t))
                .count();
            if available < needed {
                self.messages.push(format!(
                    "player {player} is available at {available} timeslots but needs {needed}"
                ));
            }
        }
    }

    fn check_player_restrictions(&mut self, event: &Event) {
        for (player, slots) in event.players_at_timeslots() {
            let usable = slots.iter().filter(|t| !event.is_break(t)).count();
            if usable < event.matches_per_player() {
                self.messages.push(format!(
                    "player {player} may begin matches at {usable} timeslots but plays {} matches",
                    event.matches_per_player()
                ));
            }
        }
        for (player, courts) in event.players_in_localizations() {
            if courts.is_empty() {
                self.messages
                    .push(format!("player {player} is restricted to no localization"));
            }
        }
    }

    fn check_localizations(&mut self, event: &Event) {
        let any_open = event.localizations().iter().any(|court| {
            event
                .timeslots()
                .iter()
                .any(|t| !event.is_break(t) && !event.is_localization_unavailable(court, t))
        });
        if !any_open {
            self.messages
                .push("no localization is available at any timeslot".to_string());
        }
    }

    fn check_teams(&mut self, event: &Event) {
        if !event.has_teams() {
            return;
        }
        let covered: BTreeSet<_> = event.teams().iter().flat_map(|t| t.players()).collect();
        for player in event.players() {
            if !covered.contains(player) {
                self.messages
                    .push(format!("player {player} does not belong to any team"));
            }
        }
    }

    fn check_matchups(&mut self, event: &Event) {
        let mpp = event.matches_per_player();
        for player in event.players() {
            let total: usize = event
                .predefined_matchups()
                .iter()
                .filter(|m| m.involves(player))
                .map(|m| match event.matchup_mode() {
                    MatchupMode::Custom => m.occurrences(),
                    MatchupMode::AllEqual => mpp,
                    MatchupMode::AllDifferent | MatchupMode::Any => 1,
                })
                .sum();
            if total > mpp {
                self.messages.push(format!(
                    "predefined matchups require {total} matches of player {player} but it plays {mpp}"
                ));
            }
        }
        let matchups = event.predefined_matchups();
        if event.matchup_mode() == MatchupMode::AllDifferent {
            for (i, matchup) in matchups.iter().enumerate() {
                if matchups[..i].iter().any(|m| m.has_same_players(matchup)) {
                    let names: Vec<_> = matchup.players().iter().map(|p| p.name()).collect();
                    self.messages.push(format!(
                        "matchup [{}] is repeated but matchups must all be different",
                        names.join(", ")
                    ));
                }
            }
        }
        for matchup in matchups {
            if event.has_teams() {
                let split = matchup.players().iter().any(|p| {
                    event
                        .team_of(p)
                        .is_some_and(|team| team.players().iter().any(|mate| !matchup.involves(mate)))
                });
                if split {
                    let names: Vec<_> = matchup.players().iter().map(|p| p.name()).collect();
                    self.messages.push(format!(
                        "matchup [{}] splits a team",
                        names.join(", ")
                    ));
                }
            }
        }
    }
}

impl Validator<Event> for EventValidator {
    fn validate(&mut self, event: &Event) -> bool {
        self.messages.clear();
        self.check_player_availability(event);
        self.check_player_restrictions(event);
        self.check_localizations(event);
        self.check_teams(event);
        self.check_matchups(event);
        self.messages.is_empty()
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Validates the events of a tournament, each one with an
/// [`EventValidator`], plus the checks that span events.
#[derive(Debug, Default, Clone)]
pub struct TournamentValidator {
    messages: Vec<String>,
}

impl TournamentValidator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator<[Event]> for TournamentValidator {
    fn validate(&mut self, events: &[Event]) -> bool {
        self.messages.clear();
        if events.is_empty() {
            self.messages
                .push("a tournament needs at least one event".to_string());
        }
        let mut names = BTreeSet::new();
        for event in events {
            if !names.insert(event.name()) {
                self.messages
                    .push(format!("event name {} is used more than once", event.name()));
            }
        }
        let mut event_validator = EventValidator::new();
        for event in events {
            if !event_validator.validate(event) {
                self.messages.extend(
                    event_validator
                        .messages()
                        .iter()
                        .map(|m| format!("event {}: {m}", event.name())),
                );
            }
        }
        self.messages.is_empty()
    }

    fn messages(&self) -> &[String] {
        &self.messages
    }
}
