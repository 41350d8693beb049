use std::fmt;

use courtforge_core::{Event, Localization, Match, Player, Timeslot};

use super::{render_grid, render_matches, EventSchedule, LocalizationScheduleValue, Schedule};
use crate::index::TournamentIndex;

/// Localization view: one cell per localization and timeslot.
///
/// A cell is `Unavailable` only if every event holding that localization and
/// timeslot rules it out, through a break or an unavailable localization.
/// When only some of them do, the cell is `Limited`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalizationSchedule {
    name: String,
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    cells: Vec<Vec<LocalizationScheduleValue>>,
    matches: Vec<Match>,
}

impl LocalizationSchedule {
    /// Localization view of a single event.
    pub fn for_event(event: &Event, schedule: &EventSchedule) -> Self {
        Self::build(
            event.name().to_string(),
            event.players().to_vec(),
            event.localizations().to_vec(),
            event.timeslots().to_vec(),
            &[event],
            schedule.matches().to_vec(),
        )
    }

    /// Localization view of several events over the tournament-wide index.
    pub fn for_tournament(
        name: impl Into<String>,
        index: &TournamentIndex,
        events: &[Event],
        schedules: &[EventSchedule],
    ) -> Self {
        let mut matches: Vec<Match> = schedules
            .iter()
            .flat_map(|s| s.matches().iter().cloned())
            .collect();
        matches.sort_by(|a, b| a.start().cmp(b.start()));
        let events: Vec<&Event> = events.iter().collect();
        Self::build(
            name.into(),
            index.players().to_vec(),
            index.localizations().to_vec(),
            index.timeslots().to_vec(),
            &events,
            matches,
        )
    }

    fn build(
        name: String,
        players: Vec<Player>,
        localizations: Vec<Localization>,
        timeslots: Vec<Timeslot>,
        events: &[&Event],
        matches: Vec<Match>,
    ) -> Self {
        let mut cells: Vec<Vec<LocalizationScheduleValue>> =
            Vec::with_capacity(localizations.len());
        for localization in &localizations {
            let row: Vec<LocalizationScheduleValue> = timeslots
                .iter()
                .map(|timeslot| restriction(events, localization, timeslot))
                .collect();
            cells.push(row);
        }

        for game in &matches {
            let Some(c) = localizations.iter().position(|l| l == game.localization()) else {
                continue;
            };
            let indices: Vec<usize> = game
                .players()
                .iter()
                .filter_map(|player| players.iter().position(|p| p == player))
                .collect();
            for (t, timeslot) in timeslots.iter().enumerate() {
                if timeslot == game.start() {
                    cells[c][t] = LocalizationScheduleValue::Occupied(indices.clone());
                } else if game.spans(timeslot) {
                    cells[c][t] = LocalizationScheduleValue::Continuation;
                }
            }
        }

        Self {
            name,
            players,
            localizations,
            timeslots,
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

    /// Cells indexed `[localization][timeslot]`.
    pub fn cells(&self) -> &[Vec<LocalizationScheduleValue>] {
        &self.cells
    }

    pub fn cell(
        &self,
        localization: &Localization,
        timeslot: &Timeslot,
    ) -> Option<&LocalizationScheduleValue> {
        let c = self.localizations.iter().position(|x| x == localization)?;
        let t = self.timeslots.iter().position(|x| x == timeslot)?;
        Some(&self.cells[c][t])
    }

    fn count(&self, keep: impl Fn(&LocalizationScheduleValue) -> bool) -> usize {
        self.cells.iter().flatten().filter(|v| keep(v)).count()
    }
}

/// Restriction of one cell before matches are laid over it.
fn restriction(
    events: &[&Event],
    localization: &Localization,
    timeslot: &Timeslot,
) -> LocalizationScheduleValue {
    let covering = events
        .iter()
        .filter(|e| e.contains_localization(localization) && e.contains_timeslot(timeslot));
    let (mut total, mut marked) = (0, 0);
    for event in covering {
        total += 1;
        if event.is_break(timeslot) || event.is_localization_unavailable(localization, timeslot) {
            marked += 1;
        }
    }
    if marked == 0 {
        LocalizationScheduleValue::Free
    } else if marked == total {
        LocalizationScheduleValue::Unavailable
    } else {
        LocalizationScheduleValue::Limited
    }
}

impl Schedule for LocalizationSchedule {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self) -> &[Match] {
        &self.matches
    }

    fn total_timeslots(&self) -> usize {
        self.localizations.len() * self.timeslots.len()
    }

    fn available_timeslots(&self) -> usize {
        self.count(|v| {
            matches!(
                v,
                LocalizationScheduleValue::Free
                    | LocalizationScheduleValue::Occupied(_)
                    | LocalizationScheduleValue::Continuation
            )
        })
    }

    fn occupation(&self) -> usize {
        self.count(LocalizationScheduleValue::is_occupied)
    }
}

impl fmt::Display for LocalizationSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.localizations.iter().map(ToString::to_string).collect();
        render_grid(f, &self.name, &rows, &self.timeslots, &self.cells)?;
        render_matches(f, &self.matches)
    }
}
