//! Tournament-wide index space.

use courtforge_core::{Event, Localization, Player, Timeslot};

/// Union of the players, localizations and timeslots of several events, in
/// first-seen order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TournamentIndex {
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
}

impl TournamentIndex {
    pub fn new(events: &[Event]) -> Self {
        let mut index = Self::default();
        for event in events {
            push_new(&mut index.players, event.players());
            push_new(&mut index.localizations, event.localizations());
            push_new(&mut index.timeslots, event.timeslots());
        }
        index
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

    pub fn player_index(&self, player: &Player) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    pub fn localization_index(&self, localization: &Localization) -> Option<usize> {
        self.localizations.iter().position(|l| l == localization)
    }

    pub fn timeslot_index(&self, timeslot: &Timeslot) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }
}

fn push_new<T: Clone + PartialEq>(union: &mut Vec<T>, items: &[T]) {
    for item in items {
        if !union.contains(item) {
            union.push(item.clone());
        }
    }
}
