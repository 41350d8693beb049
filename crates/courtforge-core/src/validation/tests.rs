//! Tests for event and tournament validation.

use super::*;
use crate::domain::{localizations, players, timeslots, Matchup, Team};

fn singles() -> Event {
    Event::new("Singles", players(4), localizations(1), timeslots(4)).unwrap()
}

#[test]
fn test_valid_event_has_no_messages() {
    let mut validator = EventValidator::new();
    assert!(validator.validate(&singles()));
    assert!(validator.messages().is_empty());
}

#[test]
fn test_exact_capacity_validates() {
    let event = Event::builder("Exact")
        .players(players(4))
        .localizations(localizations(2))
        .timeslots(timeslots(6))
        .matches_per_player(3)
        .timeslots_per_match(2)
        .build()
        .unwrap();
    assert!(EventValidator::new().validate(&event));
}

#[test]
fn test_player_without_enough_available_timeslots() {
    let mut event = singles();
    let roster = players(1);
    let p = &roster[0];
    let slots = timeslots(4);
    event
        .add_unavailable_player_in_range(p, &slots[0], &slots[2])
        .unwrap();

    let mut validator = EventValidator::new();
    assert!(!validator.validate(&event));
    assert_eq!(validator.messages().len(), 1);
    assert!(validator.messages()[0].contains("Player 1"));
}

#[test]
fn test_matchup_occurrences_exceed_matches_per_player() {
    let mut event = singles();
    event.set_matchup_mode(MatchupMode::Custom);
    let matchup = Matchup::new(players(2)).unwrap().with_occurrences(2).unwrap();
    event.add_matchup(matchup).unwrap();

    let mut validator = EventValidator::new();
    assert!(!validator.validate(&event));
    assert_eq!(validator.messages().len(), 2);
}

#[test]
fn test_teams_must_cover_all_players() {
    let mut event = Event::builder("Doubles")
        .players(players(4))
        .localizations(localizations(1))
        .timeslots(timeslots(2))
        .players_per_match(4)
        .build()
        .unwrap();
    event.add_team(Team::of(players(2)).unwrap()).unwrap();

    let mut validator = EventValidator::new();
    assert!(!validator.validate(&event));
    assert_eq!(validator.messages().len(), 2);
}

#[test]
fn test_messages_reset_between_runs() {
    let mut bad = singles();
    let slots = timeslots(4);
    bad.add_break_range(&slots[0], &slots[2]).unwrap();

    let mut validator = EventValidator::new();
    assert!(!validator.validate(&bad));
    assert!(!validator.messages().is_empty());
    assert!(validator.validate(&singles()));
    assert!(validator.messages().is_empty());
}

#[test]
fn test_tournament_rejects_duplicate_event_names() {
    let events = vec![singles(), singles()];
    let mut validator = TournamentValidator::new();
    assert!(!validator.validate(events.as_slice()));
    assert_eq!(validator.messages().len(), 1);
}

#[test]
fn test_tournament_prefixes_event_messages() {
    let mut bad = singles();
    let slots = timeslots(4);
    bad.add_break_range(&slots[1], &slots[3]).unwrap();
    let events = vec![bad];

    let mut validator = TournamentValidator::new();
    assert!(!validator.validate(events.as_slice()));
    assert!(validator
        .messages()
        .iter()
        .all(|m| m.starts_with("event Singles: ")));
}
