//! Read-only schedule views.
//!
//! Player views ([`EventSchedule`], [`TournamentSchedule`]) hold one cell
//! per player and timeslot; the [`LocalizationSchedule`] holds one cell per
//! localization and timeslot.

mod event;
mod localization;
mod tournament;


use std::fmt;

use courtforge_core::{Localization, Match, Player, Team, Timeslot};

pub use event::EventSchedule;
pub use localization::LocalizationSchedule;
pub use tournament::TournamentSchedule;

/// Cell of a player view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleValue {
    Free,
    /// Playing at the localization with this index.
    Occupied(usize),
    Unavailable,
    Break,
    /// Outside the timeslots the player is restricted to.
    Limited,
    /// The player does not take part in any event holding this timeslot.
    NotInDomain,
}

impl ScheduleValue {
    pub fn is_occupied(&self) -> bool {
        matches!(self, ScheduleValue::Occupied(_))
    }
}

impl fmt::Display for ScheduleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleValue::Free => f.write_str("-"),
            ScheduleValue::Occupied(localization) => write!(f, "{localization}"),
            ScheduleValue::Unavailable => f.write_str("*"),
            ScheduleValue::Break => f.write_str("~"),
            ScheduleValue::Limited => f.write_str("_"),
            ScheduleValue::NotInDomain => f.write_str("x"),
        }
    }
}

/// Cell of a localization view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalizationScheduleValue {
    Free,
    /// A match begins here; holds the indices of its players.
    Occupied(Vec<usize>),
    /// A match that began earlier is still being played.
    Continuation,
    /// Unavailable for some, but not all, of the events covering the cell.
    Limited,
    /// Unavailable for every event covering the cell.
    Unavailable,
}

impl LocalizationScheduleValue {
    pub fn is_occupied(&self) -> bool {
        matches!(
            self,
            LocalizationScheduleValue::Occupied(_) | LocalizationScheduleValue::Continuation
        )
    }
}

impl fmt::Display for LocalizationScheduleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizationScheduleValue::Free => f.write_str("-"),
            LocalizationScheduleValue::Occupied(players) => {
                let indices: Vec<String> = players.iter().map(ToString::to_string).collect();
                f.write_str(&indices.join(","))
            }
            LocalizationScheduleValue::Continuation => f.write_str("<"),
            LocalizationScheduleValue::Limited => f.write_str("_"),
            LocalizationScheduleValue::Unavailable => f.write_str("*"),
        }
    }
}

/// Common surface of every schedule view.
pub trait Schedule {
    fn name(&self) -> &str;

    fn matches(&self) -> &[Match];

    /// Number of cells of the view.
    fn total_timeslots(&self) -> usize;

    /// Cells where a match could be, or is, played.
    fn available_timeslots(&self) -> usize;

    /// Cells where a match is played.
    fn occupation(&self) -> usize;

    fn occupation_ratio(&self) -> f64 {
        match self.available_timeslots() {
            0 => 0.0,
            available => self.occupation() as f64 / available as f64,
        }
    }

    fn filter_matches_by_player(&self, player: &Player) -> Vec<&Match> {
        self.matches().iter().filter(|m| m.involves(player)).collect()
    }

    /// Matches in which every one of `players` takes part.
    fn filter_matches_by_players(&self, players: &[Player]) -> Vec<&Match> {
        self.matches()
            .iter()
            .filter(|m| players.iter().all(|p| m.involves(p)))
            .collect()
    }

    fn filter_matches_by_localization(&self, localization: &Localization) -> Vec<&Match> {
        self.matches()
            .iter()
            .filter(|m| m.localization() == localization)
            .collect()
    }

    /// Matches being played during `timeslot`.
    fn filter_matches_by_timeslot(&self, timeslot: &Timeslot) -> Vec<&Match> {
        self.matches().iter().filter(|m| m.spans(timeslot)).collect()
    }

    fn filter_matches_by_team(&self, team: &Team) -> Vec<&Match> {
        self.matches().iter().filter(|m| m.involves_team(team)).collect()
    }
}

/// Renders a grid with one labelled row per entity and one column per
/// timeslot.
pub(crate) fn render_grid<C: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[String],
    timeslots: &[Timeslot],
    cells: &[Vec<C>],
) -> fmt::Result {
    let label_width = rows.iter().map(String::len).max().unwrap_or(0);
    let rendered: Vec<Vec<String>> = cells
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    let headers: Vec<String> = timeslots.iter().map(ToString::to_string).collect();
    let widths: Vec<usize> = (0..timeslots.len())
        .map(|t| {
            rendered
                .iter()
                .filter_map(|row| row.get(t).map(String::len))
                .chain(std::iter::once(headers[t].len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    writeln!(f, "{title}")?;
    write!(f, "{:label_width$}", "")?;
    for (header, width) in headers.iter().zip(&widths) {
        write!(f, " {header:>width$}")?;
    }
    for (label, row) in rows.iter().zip(&rendered) {
        writeln!(f)?;
        write!(f, "{label:label_width$}")?;
        for (cell, width) in row.iter().zip(&widths) {
            write!(f, " {cell:>width$}")?;
        }
    }
    Ok(())
}

/// Renders the match list of a view, one per line.
pub(crate) fn render_matches(f: &mut fmt::Formatter<'_>, matches: &[Match]) -> fmt::Result {
    for game in matches {
        writeln!(f)?;
        write!(f, "{game}")?;
    }
    Ok(())
}
