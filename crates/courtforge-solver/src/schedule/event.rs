use std::fmt;

use courtforge_core::{Event, Localization, Match, Player, Timeslot};

use super::{render_grid, render_matches, Schedule, ScheduleValue};

/// Player view of one solved event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventSchedule {
    name: String,
    players: Vec<Player>,
    localizations: Vec<Localization>,
    timeslots: Vec<Timeslot>,
    cells: Vec<Vec<ScheduleValue>>,
    matches: Vec<Match>,
}

impl EventSchedule {
    /// Lays the matches of `event` over its players and timeslots.
    ///
    /// Cells not covered by a match take the event's own restrictions:
    /// `Break`, then `Unavailable`, then `Limited`, otherwise `Free`.
    pub fn new(event: &Event, matches: Vec<Match>) -> Self {
        let mut cells: Vec<Vec<ScheduleValue>> = event
            .players()
            .iter()
            .map(|player| {
                event
                    .timeslots()
                    .iter()
                    .map(|timeslot| restriction(event, player, timeslot))
                    .collect()
            })
            .collect();

        for game in &matches {
            let Some(court) = event.localization_index(game.localization()) else {
                continue;
            };
            for player in game.players() {
                let Some(p) = event.player_index(player) else {
                    continue;
                };
                for (t, timeslot) in event.timeslots().iter().enumerate() {
                    if game.spans(timeslot) {
                        cells[p][t] = ScheduleValue::Occupied(court);
                    }
                }
            }
        }

        Self {
            name: event.name().to_string(),
            players: event.players().to_vec(),
            localizations: event.localizations().to_vec(),
            timeslots: event.timeslots().to_vec(),
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

    /// Cells indexed `[player][timeslot]`.
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

fn restriction(event: &Event, player: &Player, timeslot: &Timeslot) -> ScheduleValue {
    if event.is_break(timeslot) {
        ScheduleValue::Break
    } else if event.is_player_unavailable(player, timeslot) {
        ScheduleValue::Unavailable
    } else if !event.is_player_allowed_at(player, timeslot) {
        ScheduleValue::Limited
    } else {
        ScheduleValue::Free
    }
}

impl Schedule for EventSchedule {
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

impl fmt::Display for EventSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<String> = self.players.iter().map(ToString::to_string).collect();
        render_grid(f, &self.name, &rows, &self.timeslots, &self.cells)?;
        render_matches(f, &self.matches)
    }
}
