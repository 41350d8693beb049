//! Events that share entities.

use courtforge_core::{localizations, timeslots, Event, Player};

use crate::event::named_players;

/// Two events with distinct players on the same two courts and timeslots.
pub fn shared_courts() -> Vec<Event> {
    let men = Event::builder("Men")
        .players(named_players("Man", 4))
        .localizations(localizations(2))
        .timeslots(timeslots(4))
        .timeslots_per_match(1)
        .build()
        .expect("valid men fixture");
    let women = Event::builder("Women")
        .players(named_players("Woman", 4))
        .localizations(localizations(2))
        .timeslots(timeslots(4))
        .timeslots_per_match(1)
        .build()
        .expect("valid women fixture");
    vec![men, women]
}

/// Two events on separate courts with one player entered in both.
pub fn shared_player() -> Vec<Event> {
    let shared = Player::new("Shared");
    let mut singles_players = named_players("Single", 1);
    singles_players.push(shared.clone());
    let mut veterans_players = named_players("Veteran", 1);
    veterans_players.push(shared);

    let singles = Event::builder("Singles")
        .players(singles_players)
        .localizations(vec![courtforge_core::Localization::new("Centre")])
        .timeslots(timeslots(2))
        .timeslots_per_match(1)
        .build()
        .expect("valid singles fixture");
    let veterans = Event::builder("Veterans")
        .players(veterans_players)
        .localizations(vec![courtforge_core::Localization::new("Annex")])
        .timeslots(timeslots(2))
        .timeslots_per_match(1)
        .build()
        .expect("valid veterans fixture");
    vec![singles, veterans]
}
