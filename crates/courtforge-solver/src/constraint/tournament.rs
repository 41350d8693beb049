//! Constraints spanning several events.

use std::collections::BTreeMap;

use courtforge_core::Event;

use super::none_or;
use crate::encoder::EventVariables;
use crate::engine::{Model, SumTarget, Var};
use crate::index::TournamentIndex;

/// Occupancy variables of one event at one localization and timeslot,
/// leaving out closed cells.
fn open_cells(vars: &EventVariables, c: usize, t: usize) -> Vec<Var> {
    (0..vars.players())
        .filter(|&p| vars.can_occupy(p, c, t))
        .map(|p| vars.x(p, c, t))
        .collect()
}

pub(super) fn localization_collision(model: &mut Model, events: &[Event], vars: &[EventVariables]) {
    let index = TournamentIndex::new(events);
    for localization in index.localizations() {
        for timeslot in index.timeslots() {
            // (players per match, open occupancy variables) of each event
            // still able to use this localization at this timeslot
            let sharing: Vec<(i32, Vec<Var>)> = events
                .iter()
                .zip(vars)
                .filter_map(|(event, vars)| {
                    let c = event.localization_index(localization)?;
                    let t = event.timeslot_index(timeslot)?;
                    let cells = open_cells(vars, c, t);
                    (!cells.is_empty()).then_some((event.players_per_match() as i32, cells))
                })
                .collect();
            if sharing.len() < 2 {
                continue;
            }

            // Same-sized matches of different events must not add up to a
            // legal total.
            let mut by_size: BTreeMap<i32, Vec<Var>> = BTreeMap::new();
            for (ppm, cells) in &sharing {
                by_size.entry(*ppm).or_default().extend_from_slice(cells);
            }
            for (ppm, cells) in by_size {
                if cells.len() > ppm as usize {
                    none_or(model, &cells, ppm);
                }
            }

            // At most one event holds the localization.
            let mut users = Vec::with_capacity(sharing.len());
            for (ppm, cells) in &sharing {
                users.push(none_or(model, cells, *ppm));
            }
            model.sum(&users, SumTarget::AtMost(1));
        }
    }
}

pub(super) fn player_not_simultaneous(model: &mut Model, events: &[Event], vars: &[EventVariables]) {
    let index = TournamentIndex::new(events);
    for player in index.players() {
        for timeslot in index.timeslots() {
            let mut events_involved = 0;
            let mut cells = Vec::new();
            for (event, vars) in events.iter().zip(vars) {
                let (Some(p), Some(t)) = (event.player_index(player), event.timeslot_index(timeslot))
                else {
                    continue;
                };
                let open: Vec<Var> = (0..vars.localizations())
                    .filter(|&c| vars.can_occupy(p, c, t))
                    .map(|c| vars.x(p, c, t))
                    .collect();
                if !open.is_empty() {
                    events_involved += 1;
                    cells.extend(open);
                }
            }
            if events_involved > 1 {
                model.sum(&cells, SumTarget::AtMost(1));
            }
        }
    }
}
