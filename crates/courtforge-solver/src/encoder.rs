//! Problem encoder: one pair of boolean arrays per event.
//!
//! `x[p][c][t]` is 1 when player `p` occupies localization `c` at timeslot
//! `t`; `g[p][c][t]` is 1 when a match of `p` begins there. Hard facts of
//! the event (breaks, unavailability, per-player restrictions and windows
//! that would run past the last timeslot) close cells before any
//! constraint is posted: a closed cell is created fixed to 0.

use courtforge_config::VariableOrder;
use courtforge_core::Event;

use crate::engine::{Model, Var};

/// Decision variables of one event.
#[derive(Debug, Clone)]
pub struct EventVariables {
    players: usize,
    localizations: usize,
    timeslots: usize,
    x: Vec<Var>,
    g: Vec<Var>,
    occupiable: Vec<bool>,
    startable: Vec<bool>,
}

impl EventVariables {
    fn allocate(model: &mut Model, event: &Event) -> Self {
        let players = event.players().len();
        let localizations = event.localizations().len();
        let timeslots = event.timeslots().len();
        let cells = players * localizations * timeslots;
        let mut vars = Self {
            players,
            localizations,
            timeslots,
            x: Vec::with_capacity(cells),
            g: Vec::with_capacity(cells),
            occupiable: vec![true; cells],
            startable: vec![true; cells],
        };
        vars.close_restricted(event);
        vars.x = vars.occupiable.iter().map(|&open| model.new_bool(open)).collect();
        vars.g = vars.startable.iter().map(|&open| model.new_bool(open)).collect();
        vars
    }

    #[inline]
    fn offset(&self, p: usize, c: usize, t: usize) -> usize {
        debug_assert!(p < self.players && c < self.localizations && t < self.timeslots);
        (p * self.localizations + c) * self.timeslots + t
    }

    /// Occupancy variable of player `p` at localization `c`, timeslot `t`.
    #[inline]
    pub fn x(&self, p: usize, c: usize, t: usize) -> Var {
        self.x[self.offset(p, c, t)]
    }

    /// Match-begins-here variable of player `p` at localization `c`, timeslot `t`.
    #[inline]
    pub fn g(&self, p: usize, c: usize, t: usize) -> Var {
        self.g[self.offset(p, c, t)]
    }

    /// Returns false if `x(p, c, t)` was created fixed to 0.
    #[inline]
    pub fn can_occupy(&self, p: usize, c: usize, t: usize) -> bool {
        self.occupiable[self.offset(p, c, t)]
    }

    /// Returns false if `g(p, c, t)` was created fixed to 0.
    #[inline]
    pub fn can_start(&self, p: usize, c: usize, t: usize) -> bool {
        self.startable[self.offset(p, c, t)]
    }

    #[inline]
    pub fn players(&self) -> usize {
        self.players
    }

    #[inline]
    pub fn localizations(&self) -> usize {
        self.localizations
    }

    #[inline]
    pub fn timeslots(&self) -> usize {
        self.timeslots
    }

    pub fn all_x(&self) -> &[Var] {
        &self.x
    }

    pub fn all_g(&self) -> &[Var] {
        &self.g
    }

    /// Occupancy variables laid out in the requested branching order.
    pub fn ordered_x(&self, order: VariableOrder) -> Vec<Var> {
        let (np, nc, nt) = (self.players, self.localizations, self.timeslots);
        let mut vars = Vec::with_capacity(self.x.len());
        match order {
            VariableOrder::PlayerMajor => vars.extend_from_slice(&self.x),
            VariableOrder::CourtMajor => {
                for c in 0..nc {
                    for t in 0..nt {
                        for p in 0..np {
                            vars.push(self.x(p, c, t));
                        }
                    }
                }
            }
            VariableOrder::TimeslotMajor => {
                for t in 0..nt {
                    for c in 0..nc {
                        for p in 0..np {
                            vars.push(self.x(p, c, t));
                        }
                    }
                }
            }
        }
        vars
    }

    fn close_cell(&mut self, p: usize, c: usize, t: usize) {
        let i = self.offset(p, c, t);
        self.occupiable[i] = false;
        self.startable[i] = false;
    }

    fn close_start(&mut self, p: usize, c: usize, t: usize) {
        let i = self.offset(p, c, t);
        self.startable[i] = false;
    }

    fn close_restricted(&mut self, event: &Event) {
        let duration = event.timeslots_per_match();
        let (np, nc, nt) = (self.players, self.localizations, self.timeslots);

        for (player, slots) in event.unavailable_players() {
            let Some(p) = event.player_index(player) else {
                continue;
            };
            for t in slots.iter().filter_map(|slot| event.timeslot_index(slot)) {
                for c in 0..nc {
                    self.close_cell(p, c, t);
                    // No match of this player may begin in a window covering t.
                    for i in 0..duration.min(t + 1) {
                        self.close_start(p, c, t - i);
                    }
                }
            }
        }

        for (localization, slots) in event.unavailable_localizations() {
            let Some(c) = event.localization_index(localization) else {
                continue;
            };
            for t in slots.iter().filter_map(|slot| event.timeslot_index(slot)) {
                for p in 0..np {
                    self.close_cell(p, c, t);
                }
            }
        }

        for (p, player) in event.players().iter().enumerate() {
            for (c, localization) in event.localizations().iter().enumerate() {
                if event.is_player_allowed_in(player, localization) {
                    continue;
                }
                for t in 0..nt {
                    self.close_cell(p, c, t);
                }
            }
            for (t, timeslot) in event.timeslots().iter().enumerate() {
                if event.is_player_allowed_at(player, timeslot) {
                    continue;
                }
                for c in 0..nc {
                    self.close_start(p, c, t);
                }
            }
        }

        for t in event.breaks().iter().filter_map(|slot| event.timeslot_index(slot)) {
            for p in 0..np {
                for c in 0..nc {
                    self.close_cell(p, c, t);
                }
            }
        }

        // A match cannot begin where it would run past the last timeslot.
        for t in nt.saturating_sub(duration - 1)..nt {
            for p in 0..np {
                for c in 0..nc {
                    self.close_start(p, c, t);
                }
            }
        }
    }
}

/// Allocates the variables of every event, closing the cells its hard
/// facts rule out.
pub fn encode(model: &mut Model, events: &[Event]) -> Vec<EventVariables> {
    events
        .iter()
        .map(|event| EventVariables::allocate(model, event))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtforge_core::{localizations, players, timeslots, Event};

    fn event() -> Event {
        Event::builder("Singles")
            .players(players(2))
            .localizations(localizations(2))
            .timeslots(timeslots(6))
            .build()
            .unwrap()
    }

    fn encoded(event: Event) -> EventVariables {
        encode(&mut Model::new(), &[event]).remove(0)
    }

    #[test]
    fn test_unavailable_player_blocks_overlapping_starts() {
        let mut e = event();
        let slots = timeslots(6);
        let roster = players(2);
        e.add_unavailable_player(&roster[0], &slots[3]).unwrap();

        let vars = encoded(e);
        for c in 0..2 {
            assert!(!vars.can_occupy(0, c, 3));
            assert!(!vars.can_start(0, c, 3));
            assert!(!vars.can_start(0, c, 2));
            assert!(vars.can_start(0, c, 1));
            assert!(vars.can_occupy(0, c, 2));
            assert!(vars.can_start(1, c, 2));
        }
    }

    #[test]
    fn test_unavailable_at_first_timeslot_stays_in_range() {
        let mut e = event();
        let roster = players(2);
        e.add_unavailable_player(&roster[1], &timeslots(1)[0]).unwrap();

        let vars = encoded(e);
        assert!(!vars.can_start(1, 0, 0));
        assert!(vars.can_start(1, 0, 1));
    }

    #[test]
    fn test_truncated_windows_cannot_start() {
        let vars = encoded(event());
        assert!(!vars.can_start(0, 0, 5));
        assert!(vars.can_start(0, 0, 4));
        assert!(vars.can_occupy(0, 0, 5));
    }

    #[test]
    fn test_breaks_and_restrictions() {
        let mut e = event();
        let slots = timeslots(6);
        let courts = localizations(2);
        let roster = players(2);
        e.add_break(&slots[0]).unwrap();
        e.add_unavailable_localization(&courts[1], &slots[2]).unwrap();
        e.add_player_in_localization(&roster[0], &courts[0]).unwrap();
        e.add_player_at_timeslot(&roster[1], &slots[3]).unwrap();

        let vars = encoded(e);
        assert!(!vars.can_occupy(1, 0, 0));
        assert!(!vars.can_start(1, 1, 2));
        assert!(!vars.can_occupy(1, 1, 2));
        assert!(!vars.can_occupy(0, 1, 3));
        assert!(vars.can_occupy(0, 0, 3));
        assert!(!vars.can_start(1, 0, 1));
        assert!(vars.can_start(1, 0, 3));
        assert!(vars.can_occupy(1, 0, 1));
    }

    #[test]
    fn test_one_variable_per_cell_and_array() {
        let mut model = Model::new();
        let vars = encode(&mut model, &[event(), event()]);
        assert_eq!(model.num_variables(), 2 * 2 * 24);
        assert_eq!(vars[1].all_g().len(), 24);
        assert_ne!(vars[0].x(0, 0, 0), vars[1].x(0, 0, 0));
    }

    #[test]
    fn test_variable_orders_cover_every_cell() {
        let vars = encoded(event());
        let player_major = vars.ordered_x(VariableOrder::PlayerMajor);
        let court_major = vars.ordered_x(VariableOrder::CourtMajor);
        let timeslot_major = vars.ordered_x(VariableOrder::TimeslotMajor);

        assert_eq!(player_major.len(), 24);
        assert_eq!(court_major[1], vars.x(1, 0, 0));
        assert_eq!(timeslot_major[2], vars.x(0, 1, 0));
        for var in player_major {
            assert!(court_major.contains(&var));
            assert!(timeslot_major.contains(&var));
        }
    }
}
