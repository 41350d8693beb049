//! CourtForge - Tournament scheduling in Rust
//!
//! Describe events, collect them in a tournament and ask for schedules.
//!
//! # Example
//!
//! ```rust
//! use courtforge::prelude::*;
//!
//! let event = Event::builder("Singles")
//!     .players(players(4))
//!     .localizations(localizations(2))
//!     .timeslots(timeslots(2))
//!     .timeslots_per_match(1)
//!     .build()
//!     .unwrap();
//!
//! let mut tournament = Tournament::new("Club Night", vec![event]).unwrap();
//! assert!(tournament.solve().unwrap());
//! assert_eq!(tournament.schedule().unwrap().matches().len(), 2);
//! ```

// Domain model
pub use courtforge_core::{
    localizations, players, timeslots, CourtForgeError, Event, EventBuilder, EventValidator,
    Localization, Match, Matchup, MatchupMode, Player, Result, Team, Timeslot,
    TournamentValidator, Validator,
};

// Configuration
pub use courtforge_config::{
    ConfigError, SearchConfig, SearchStrategyType, SolverConfig, TerminationConfig, ValueChoice,
    VariableOrder,
};

// Solving and schedules
pub use courtforge_solver::{
    EventSchedule, Feasibility, LocalizationSchedule, LocalizationScheduleValue, ResolutionData,
    Schedule, ScheduleState, ScheduleValue, SearchStrategy, SolverState, Tournament,
    TournamentSchedule, TournamentSolver,
};

mod run;
pub use run::{run_tournament, CONFIG_FILE};

pub mod prelude {
    pub use super::{localizations, players, timeslots};
    pub use super::{Event, Localization, Match, Matchup, MatchupMode, Player, Team, Timeslot};
    pub use super::{Schedule, SolverConfig, Tournament};
}
