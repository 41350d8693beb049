//! CourtForge Core - Domain model for tournament scheduling
//!
//! This crate provides the data the scheduler works on:
//! - Players, localizations (courts) and timeslots
//! - Events with their match settings and restrictions
//! - Teams, predefined matchups and scheduled matches
//! - The validation contract checked before solving

pub mod domain;
pub mod error;
pub mod validation;

pub use domain::{
    localizations, players, timeslots, Event, EventBuilder, Localization, Match, Matchup,
    MatchupMode, Player, Team, Timeslot,
};
pub use error::{CourtForgeError, Result};
pub use validation::{EventValidator, TournamentValidator, Validator};
