//! CourtForge Solver - Scheduling engine
//!
//! This crate turns events into a finite-domain model, solves it with the
//! Pumpkin constraint solver, and reads schedules back out of its solutions:
//! - Engine adapter (variables, constraints, enumeration, termination)
//! - Problem encoder (occupancy and match-start variables)
//! - Constraint catalog
//! - Solving and enumeration controller
//! - Match extraction
//! - Schedule views (per player, per localization, merged)
//! - Tournaments owning their solver session

pub mod constraint;
pub mod encoder;
pub mod engine;
pub mod extraction;
pub mod index;
pub mod resolution;
pub mod schedule;
pub mod solver;
pub mod strategy;
pub mod tournament;


pub use constraint::{catalog, ConstraintGenerator};
pub use encoder::{encode, EventVariables};
pub use extraction::extract_matches;
pub use index::TournamentIndex;
pub use resolution::{Feasibility, ResolutionData};
pub use schedule::{
    EventSchedule, LocalizationSchedule, LocalizationScheduleValue, Schedule, ScheduleValue,
    TournamentSchedule,
};
pub use solver::{SolverState, TournamentSolver};
pub use strategy::SearchStrategy;
pub use tournament::{ScheduleState, Tournament};
