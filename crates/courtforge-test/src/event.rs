//! Event fixtures.

use courtforge_core::{localizations, players, timeslots, Event, MatchupMode, Player, Team};

/// Singles event with `player_count` players, `court_count` courts and
/// `timeslot_count` generic timeslots, otherwise default settings.
pub fn singles(player_count: usize, court_count: usize, timeslot_count: usize) -> Event {
    Event::builder("Singles")
        .players(players(player_count))
        .localizations(localizations(court_count))
        .timeslots(timeslots(timeslot_count))
        .build()
        .expect("valid singles fixture")
}

/// 8 players, 2 courts, 6 timeslots, one match of two timeslots each.
pub fn eight_player_singles() -> Event {
    singles(8, 2, 6)
}

/// Every player meets every other exactly once, one timeslot per match.
///
/// Uses `player_count / 2` courts and `player_count` timeslots.
pub fn round_robin(player_count: usize) -> Event {
    Event::builder("Round Robin")
        .players(players(player_count))
        .localizations(localizations(player_count / 2))
        .timeslots(timeslots(player_count))
        .matches_per_player(player_count - 1)
        .timeslots_per_match(1)
        .matchup_mode(MatchupMode::AllDifferent)
        .build()
        .expect("valid round robin fixture")
}

/// Doubles of four fixed pairs on one court, one timeslot per match.
pub fn doubles_with_teams() -> Event {
    let roster = players(8);
    let mut event = Event::builder("Doubles")
        .players(roster.clone())
        .localizations(localizations(1))
        .timeslots(timeslots(4))
        .timeslots_per_match(1)
        .players_per_match(4)
        .build()
        .expect("valid doubles fixture");
    for pair in roster.chunks(2) {
        let team = Team::of(pair.to_vec()).expect("distinct pair");
        event.add_team(team).expect("team fits the event");
    }
    event
}

/// Named players `prefix 1` .. `prefix n`.
pub fn named_players(prefix: &str, count: usize) -> Vec<Player> {
    (1..=count)
        .map(|i| Player::new(format!("{prefix} {i}")))
        .collect()
}
