//! Constraints posted per event.

use courtforge_core::{Event, MatchupMode};

use super::none_or;
use crate::encoder::EventVariables;
use crate::engine::{Model, SumTarget, Var};

fn count(value: usize) -> i32 {
    value as i32
}

/// `g` and `x` are per player, so every match counts once per participant.
pub(super) fn total_matches(model: &mut Model, event: &Event, vars: &EventVariables) {
    let matches = count(event.number_of_matches());
    let duration = count(event.timeslots_per_match());
    let ppm = count(event.players_per_match());
    model.sum(vars.all_g(), SumTarget::Exactly(matches * ppm));
    model.sum(vars.all_x(), SumTarget::Exactly(matches * ppm * duration));
}

pub(super) fn matches_per_player(model: &mut Model, event: &Event, vars: &EventVariables) {
    let mpp = count(event.matches_per_player());
    let duration = count(event.timeslots_per_match());
    for p in 0..vars.players() {
        let mut starts = Vec::with_capacity(vars.localizations() * vars.timeslots());
        let mut cells = Vec::with_capacity(vars.localizations() * vars.timeslots());
        for c in 0..vars.localizations() {
            for t in 0..vars.timeslots() {
                starts.push(vars.g(p, c, t));
                cells.push(vars.x(p, c, t));
            }
        }
        model.sum(&starts, SumTarget::Exactly(mpp));
        model.sum(&cells, SumTarget::Exactly(mpp * duration));
    }
}

pub(super) fn localization_occupation(model: &mut Model, event: &Event, vars: &EventVariables) {
    let ppm = count(event.players_per_match());
    for (t, timeslot) in event.timeslots().iter().enumerate() {
        if event.is_break(timeslot) {
            continue;
        }
        for c in 0..vars.localizations() {
            let cells: Vec<Var> = (0..vars.players())
                .filter(|&p| vars.can_occupy(p, c, t))
                .map(|p| vars.x(p, c, t))
                .collect();
            let starts: Vec<Var> = (0..vars.players())
                .filter(|&p| vars.can_start(p, c, t))
                .map(|p| vars.g(p, c, t))
                .collect();
            none_or(model, &cells, ppm);
            none_or(model, &starts, ppm);
        }
    }
}

/// A cell is occupied exactly when one of the matches that would cover it
/// begins: `x[t] = Σ g[t - i]` over the `timeslots_per_match` windows
/// ending at `t`. Back-to-back matches on one localization are two starts,
/// never an extra one in between.
pub(super) fn match_start_mapping(model: &mut Model, event: &Event, vars: &EventVariables) {
    let duration = event.timeslots_per_match();
    for p in 0..vars.players() {
        for c in 0..vars.localizations() {
            for t in 0..vars.timeslots() {
                let mut terms: Vec<(i32, Var)> = (0..duration.min(t + 1))
                    .map(|i| t - i)
                    .filter(|&s| vars.can_start(p, c, s))
                    .map(|s| (1, vars.g(p, c, s)))
                    .collect();
                terms.push((-1, vars.x(p, c, t)));
                model.linear(&terms, SumTarget::Exactly(0));
            }
        }
    }
}

pub(super) fn non_overlapping_matches(model: &mut Model, event: &Event, vars: &EventVariables) {
    let duration = event.timeslots_per_match();
    for p in 0..vars.players() {
        for t in 0..vars.timeslots() {
            let cells: Vec<Var> = (0..vars.localizations())
                .filter(|&c| vars.can_occupy(p, c, t))
                .map(|c| vars.x(p, c, t))
                .collect();
            if cells.len() > 1 {
                model.sum(&cells, SumTarget::AtMost(1));
            }
            let starts: Vec<Var> = (0..vars.localizations())
                .flat_map(|c| (0..duration.min(t + 1)).map(move |i| (c, t - i)))
                .filter(|&(c, s)| vars.can_start(p, c, s))
                .map(|(c, s)| vars.g(p, c, s))
                .collect();
            if starts.len() > 1 {
                model.sum(&starts, SumTarget::AtMost(1));
            }
        }
    }
}

pub(super) fn teams(model: &mut Model, event: &Event, vars: &EventVariables) {
    for team in event.teams() {
        let members: Vec<usize> = team
            .players()
            .iter()
            .filter_map(|player| event.player_index(player))
            .collect();
        let Some((&leader, rest)) = members.split_first() else {
            continue;
        };
        for &member in rest {
            for c in 0..vars.localizations() {
                for t in 0..vars.timeslots() {
                    model.equal(vars.x(leader, c, t), vars.x(member, c, t));
                    model.equal(vars.g(leader, c, t), vars.g(member, c, t));
                }
            }
        }
    }
}

/// Players standing for the sides of a match: team leaders when the event
/// has teams, every player otherwise.
fn sides(event: &Event) -> Vec<usize> {
    if event.has_teams() {
        event
            .teams()
            .iter()
            .filter_map(|team| team.players().first())
            .filter_map(|player| event.player_index(player))
            .collect()
    } else {
        (0..event.players().len()).collect()
    }
}

/// Indicator that players `group` all begin a match at `(c, t)`, or `None`
/// if one of them cannot begin there.
fn together(
    model: &mut Model,
    vars: &EventVariables,
    group: &[usize],
    c: usize,
    t: usize,
) -> Option<Var> {
    if group.iter().any(|&p| !vars.can_start(p, c, t)) {
        return None;
    }
    let starts: Vec<Var> = group.iter().map(|&p| vars.g(p, c, t)).collect();
    if let [single] = starts.as_slice() {
        return Some(*single);
    }
    let indicator = model.new_bool(true);
    model.minimum(indicator, &starts);
    Some(indicator)
}

pub(super) fn matchup_mode(model: &mut Model, event: &Event, vars: &EventVariables) {
    let sides = sides(event);
    let side_size = event.teams().first().map_or(1, |team| team.size());
    if event.players_per_match() / side_size < 2 {
        return;
    }
    let mpp = count(event.matches_per_player());
    for (i, &a) in sides.iter().enumerate() {
        for &b in &sides[i + 1..] {
            let mut meetings = Vec::new();
            for c in 0..vars.localizations() {
                for t in 0..vars.timeslots() {
                    if let Some(indicator) = together(model, vars, &[a, b], c, t) {
                        meetings.push(indicator);
                    }
                }
            }
            match event.matchup_mode() {
                MatchupMode::AllDifferent => model.sum(&meetings, SumTarget::AtMost(1)),
                MatchupMode::AllEqual => {
                    none_or(model, &meetings, mpp);
                }
                MatchupMode::Any | MatchupMode::Custom => {}
            }
        }
    }
}

pub(super) fn predefined_matchups(model: &mut Model, event: &Event, vars: &EventVariables) {
    let mpp = count(event.matches_per_player());
    for matchup in event.predefined_matchups() {
        let group: Vec<usize> = matchup
            .players()
            .iter()
            .filter_map(|player| event.player_index(player))
            .collect();
        let courts: Vec<usize> = if matchup.localizations().is_empty() {
            (0..vars.localizations()).collect()
        } else {
            matchup
                .localizations()
                .iter()
                .filter_map(|l| event.localization_index(l))
                .collect()
        };
        let slots: Vec<usize> = if matchup.timeslots().is_empty() {
            (0..vars.timeslots()).collect()
        } else {
            matchup
                .timeslots()
                .iter()
                .filter_map(|t| event.timeslot_index(t))
                .collect()
        };

        let mut occurrences = Vec::with_capacity(courts.len() * slots.len());
        for &c in &courts {
            for &t in &slots {
                if let Some(indicator) = together(model, vars, &group, c, t) {
                    occurrences.push(indicator);
                }
            }
        }
        let target = match event.matchup_mode() {
            MatchupMode::AllDifferent => SumTarget::Exactly(1),
            MatchupMode::AllEqual => SumTarget::Exactly(mpp),
            MatchupMode::Any => SumTarget::Between(1, mpp),
            MatchupMode::Custom => SumTarget::Exactly(count(matchup.occurrences())),
        };
        model.sum(&occurrences, target);
    }
}
