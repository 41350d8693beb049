use std::fmt;

use courtforge_core::{Localization, Match, Player, Timeslot};

use super::{render_grid, render_matches, EventSchedule, Schedule, ScheduleValue};
use crate::index::TournamentIndex;

/// Player view of a whole tournament, merged from its event schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentSchedule {
    name: String,
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    cells: Vec<Vec<ScheduleValue>>,
    matches: Vec<Match>,
}

impl TournamentSchedule {
    /// Merges event schedules over the tournament-wide index.
    ///
    /// A cell keeps the first `Occupied` value written to it and a `Limited`
    /// value is not replaced by `Free`. Cells no event covers stay
    /// `NotInDomain`. Matches are ordered by start, earliest first.
    pub fn new(name: impl Into<String>, index: &TournamentIndex, events: &[EventSchedule]) -> Self {
        let mut cells =
            vec![vec![ScheduleValue::NotInDomain; index.timeslots().len()]; index.players().len()];
        let mut matches = Vec::new();

        for schedule in events {
            let courts: Vec<Option<usize>> = schedule
                .localizations()
                .iter()
                .map(|l| index.localization_index(l))
                .collect();
            for (p, player) in schedule.players().iter().enumerate() {
                let Some(gp) = index.player_index(player) else {
                    continue;
                };
                for (t, timeslot) in schedule.timeslots().iter().enumerate() {
                    let Some(gt) = index.timeslot_index(timeslot) else {
                        continue;
                    };
                    let value = match schedule.cells()[p][t] {
                        ScheduleValue::Occupied(court) => match courts.get(court).copied().flatten() {
                            Some(global) => ScheduleValue::Occupied(global),
                            None => continue,
                        },
                        other => other,
                    };
                    let current = &mut cells[gp][gt];
                    let keep = match (*current, value) {
                        (ScheduleValue::Occupied(_), _) => true,
                        (ScheduleValue::Limited, ScheduleValue::Free) => true,
                        _ => false,
                    };
                    if !keep {
                        *current = value;
                    }
                }
            }
            matches.extend_from_slice(schedule.matches());
        }
        matches.sort_by(|a, b| a.start().cmp(b.start()));

        Self {
            name: name.into(),
            players: index.players().to_vec(),
            localizations: index.localizations().to_vec(),
            timeslots: index.timeslots().to_vec(),
            cells,
            matches,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn localizations(&self) -> &[Localization] {
        &self.localizations
    }

    pub fn timeslots(&self) -> &[Timeslot] {
        &self.timeslots
    }

    /// Cells indexed `[player][timeslot]` over the tournament-wide index.
    pub fn cells(&self) -> &[Vec<ScheduleValue>] {
        &self.cells
    }

    pub fn cell(&self, player: &Player, timeslot: &Timeslot) -> Option<ScheduleValue> {
        let p = self.players.iter().position(|x| x == player)?;
        let t = self.timeslots.iter().position(|x| x == timeslot)?;
        Some(self.cells[p][t])
    }

    fn count(&self, keep: impl Fn(&ScheduleValue) -> bool) -> usize {
        self.cells.iter().flatten().filter(|v| keep(v)).count()
    }
}

impl Schedule for TournamentSchedule {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self) -> &[Match] {
        &self.matches
    }

    fn total_timeslots(&self) -> usize {
        self.players.len() * self.timeslots.len()
    }

    fn available_timeslots(&self) -> usize {
        self.count(|v| matches!(v, ScheduleValue::Free | ScheduleValue::Occupied(_)))
    }

    fn occupation(&self) -> usize {
        self.count(ScheduleValue::is_occupied)
    }
}

impl fmt::Display for TournamentSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.players.iter().map(ToString::to_string).collect();
        render_grid(f, &self.name, &rows, &self.timeslots, &self.cells)?;
        render_matches(f, &self.matches)
    }
}
