//! Domain model of a tournament
//!
//! - `Player`, `Localization`, `Timeslot`: named, ordered entities
//! - `Team`: players that always play together
//! - `Matchup`: a predefined group of players that must meet
//! - `Event`: one category with its own rules and invariants
//! - `Match`: a scheduled match decoded from a solution

mod entity;
mod event;
mod game;
mod matchup;
mod team;

#[cfg(test)]
mod tests;

pub use entity::{localizations, players, timeslots, Localization, Player, Timeslot};
pub use event::{Event, EventBuilder};
pub use game::Match;
pub use matchup::{Matchup, MatchupMode};
pub use team::Team;
