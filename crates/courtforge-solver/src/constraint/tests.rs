//! Tests for the constraint catalog.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use courtforge_config::ValueChoice;
use courtforge_core::{
    localizations, players, timeslots, Event, Matchup, MatchupMode, Player, Team,
};

use super::*;
use crate::encoder::encode;
use crate::engine::{request_termination, Search, SearchOutcome};
use crate::strategy::SearchStrategy;

fn singles(name: &str) -> Event {
    Event::new(name, players(4), localizations(2), timeslots(4)).unwrap()
}

/// Encodes `events`, posts the catalog plus `extra`, and returns a search
/// over the occupancy variables.
fn posted<F>(events: &[Event], extra: F) -> (Search, Vec<EventVariables>)
where
    F: FnOnce(&mut Model, &[EventVariables]),
{
    let mut model = Model::new();
    let vars = encode(&mut model, events);
    let generators = catalog(events);
    post_all(
        &generators,
        &mut PostingContext {
            model: &mut model,
            events,
            vars: &vars,
        },
    );
    extra(&mut model, &vars);
    let recorded = vars.iter().flat_map(|v| v.all_x().iter().copied()).collect();
    let strategy = SearchStrategy::min_dom(ValueChoice::LowerBound);
    let search = model.into_search(recorded, |solver| strategy.brancher(solver, &vars));
    (search, vars)
}

/// Pulls every solution, running `check` on each; returns how many.
fn for_each_solution(search: &mut Search, mut check: impl FnMut(&Search)) -> usize {
    let flag = Arc::new(AtomicBool::new(false));
    let mut found = 0;
    while search.next_solution(&mut request_termination(None, &flag)) == SearchOutcome::Solution {
        check(search);
        found += 1;
    }
    found
}

#[test]
fn test_catalog_for_plain_event() {
    let generators = catalog(&[singles("A")]);
    let names: Vec<_> = generators.iter().map(ConstraintGenerator::name).collect();
    assert_eq!(
        names,
        vec![
            "TotalMatches",
            "MatchesPerPlayer",
            "LocalizationOccupation",
            "MatchStartMapping",
            "NonOverlappingMatches",
        ]
    );
}

#[test]
fn test_catalog_adds_optional_generators() {
    let mut event = Event::builder("Doubles")
        .players(players(8))
        .localizations(localizations(2))
        .timeslots(timeslots(6))
        .players_per_match(4)
        .matches_per_player(2)
        .matchup_mode(MatchupMode::AllDifferent)
        .build()
        .unwrap();
    let roster = players(8);
    for pair in roster.chunks(2) {
        event.add_team(Team::of(pair.to_vec()).unwrap()).unwrap();
    }
    event
        .add_matchup(Matchup::new(roster[..4].to_vec()).unwrap())
        .unwrap();

    let generators = catalog(&[event, singles("B")]);
    assert!(generators.contains(&ConstraintGenerator::Teams { event: 0 }));
    assert!(generators.contains(&ConstraintGenerator::MatchupMode { event: 0 }));
    assert!(generators.contains(&ConstraintGenerator::PredefinedMatchups { event: 0 }));
    assert!(!generators.contains(&ConstraintGenerator::Teams { event: 1 }));
    assert_eq!(
        generators[generators.len() - 2..],
        [
            ConstraintGenerator::LocalizationCollision,
            ConstraintGenerator::PlayerNotSimultaneous
        ]
    );
}

#[test]
fn test_matchup_mode_needs_several_matches() {
    let mut event = singles("A");
    event.set_matchup_mode(MatchupMode::AllDifferent);
    assert!(!restricts_pairs(&event));
    event.set_matches_per_player(2).unwrap();
    assert!(restricts_pairs(&event));
}

#[test]
fn test_display_names_event() {
    assert_eq!(
        ConstraintGenerator::MatchStartMapping { event: 2 }.to_string(),
        "MatchStartMapping[2]"
    );
    assert_eq!(
        ConstraintGenerator::PlayerNotSimultaneous.to_string(),
        "PlayerNotSimultaneous"
    );
}

#[test]
fn test_occupancy_pulls_in_partner() {
    let events = [Event::new("A", players(2), localizations(1), timeslots(2)).unwrap()];
    let (mut search, vars) = posted(&events, |_, _| {});
    // Two players, one court, one possible window: the only schedule.
    let found = for_each_solution(&mut search, |s| {
        for p in 0..2 {
            assert_eq!(s.value(vars[0].x(p, 0, 0)), Some(1));
            assert_eq!(s.value(vars[0].x(p, 0, 1)), Some(1));
        }
    });
    assert_eq!(found, 1);
}

#[test]
fn test_back_to_back_on_one_court() {
    let event = Event::builder("A")
        .players(players(2))
        .localizations(localizations(1))
        .timeslots(timeslots(4))
        .matches_per_player(2)
        .build()
        .unwrap();
    let events = [event];
    // Starts at 0 and 2 are the only way to play two matches in four slots.
    let (mut search, vars) = posted(&events, |_, _| {});
    let found = for_each_solution(&mut search, |s| {
        for t in 0..4 {
            assert_eq!(s.value(vars[0].x(0, 0, t)), Some(1));
            assert_eq!(s.value(vars[0].x(1, 0, t)), Some(1));
        }
    });
    assert_eq!(found, 1);
}

#[test]
fn test_collision_blocks_shared_court() {
    let a = Event::new("A", players(2), localizations(1), timeslots(4)).unwrap();
    let other = vec![Player::new("Eve"), Player::new("Finn")];
    let b = Event::new("B", other, localizations(1), timeslots(4)).unwrap();
    let events = [a, b];
    let (mut search, vars) = posted(&events, |model, vars| {
        model.fix(vars[0].x(0, 0, 0), 1);
    });

    let found = for_each_solution(&mut search, |s| {
        for t in 0..2 {
            assert_eq!(s.value(vars[1].x(0, 0, t)), Some(0));
            assert_eq!(s.value(vars[1].x(1, 0, t)), Some(0));
        }
        for t in 2..4 {
            assert_eq!(s.value(vars[1].x(0, 0, t)), Some(1));
        }
    });
    assert_eq!(found, 1);
}

#[test]
fn test_player_in_two_events_not_simultaneous() {
    let a = Event::new("A", players(2), localizations(1), timeslots(4)).unwrap();
    let b = Event::new("B", players(2), localizations(2), timeslots(4)).unwrap();
    let events = [a, b];
    let (mut search, vars) = posted(&events, |model, vars| {
        model.fix(vars[0].x(0, 0, 1), 1);
    });

    let found = for_each_solution(&mut search, |s| {
        assert_eq!(s.value(vars[1].x(0, 0, 1)), Some(0));
        assert_eq!(s.value(vars[1].x(0, 1, 1)), Some(0));
    });
    assert!(found > 0);
}

#[test]
fn test_all_equal_repeats_the_same_pairs() {
    let event = Event::builder("A")
        .players(players(4))
        .localizations(localizations(1))
        .timeslots(timeslots(4))
        .matches_per_player(2)
        .timeslots_per_match(1)
        .matchup_mode(MatchupMode::AllEqual)
        .build()
        .unwrap();
    let events = [event];
    let (mut search, vars) = posted(&events, |_, _| {});

    let found = for_each_solution(&mut search, |s| {
        // Whoever player 0 meets first, it meets in both of its matches.
        let partners: Vec<usize> = (0..4)
            .filter(|&t| s.value(vars[0].x(0, 0, t)) == Some(1))
            .map(|t| {
                (1..4)
                    .find(|&p| s.value(vars[0].x(p, 0, t)) == Some(1))
                    .unwrap()
            })
            .collect();
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0], partners[1]);
    });
    // 3 ways to pair four players, 4!/(2!·2!) orders of the two pairs.
    assert_eq!(found, 3 * 6);
}
