//! Tournaments: several events solved together.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use courtforge_config::SolverConfig;
use courtforge_core::{
    CourtForgeError, Event, Localization, Player, Result, Timeslot, TournamentValidator,
    Validator,
};
use tracing::debug;

use crate::index::TournamentIndex;
use crate::resolution::ResolutionData;
use crate::schedule::{EventSchedule, LocalizationSchedule, TournamentSchedule};
use crate::solver::{SolverState, TournamentSolver};

/// Schedules currently held by a tournament.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScheduleState {
    /// No solution has been requested, or the last request found none.
    #[default]
    NotYetSolved,
    /// Schedules of the current solution.
    HasSolution {
        events: Vec<EventSchedule>,
        tournament: TournamentSchedule,
    },
    /// Every solution has been enumerated.
    Exhausted,
}

impl ScheduleState {
    pub fn has_solution(&self) -> bool {
        matches!(self, ScheduleState::HasSolution { .. })
    }
}

/// A named set of events sharing players and localizations.
///
/// # Examples
///
/// ```
/// use courtforge_core::{localizations, players, timeslots, Event};
/// use courtforge_solver::{Schedule, Tournament};
///
/// let event = Event::new("Singles", players(4), localizations(1), timeslots(4)).unwrap();
/// let mut tournament = Tournament::new("Club Open", vec![event]).unwrap();
///
/// assert!(tournament.solve().unwrap());
/// let schedule = tournament.schedule().unwrap();
/// assert_eq!(schedule.matches().len(), 2);
/// ```
#[derive(Debug)]
pub struct Tournament {
    name: String,
    events: Vec<Event>,
    config: SolverConfig,
    solver: Option<TournamentSolver>,
    state: ScheduleState,
    stop_flag: Arc<AtomicBool>,
}

impl Tournament {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if there are no events or two events share
    /// a name.
    pub fn new(name: impl Into<String>, events: Vec<Event>) -> Result<Self> {
        if events.is_empty() {
            return Err(CourtForgeError::InvalidArgument(
                "a tournament needs at least one event".to_string(),
            ));
        }
        for (i, event) in events.iter().enumerate() {
            if events[..i].iter().any(|e| e.name() == event.name()) {
                return Err(CourtForgeError::InvalidArgument(format!(
                    "duplicate event name {}",
                    event.name()
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            events,
            config: SolverConfig::default(),
            solver: None,
            state: ScheduleState::NotYetSolved,
            stop_flag: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_config(&mut self, config: SolverConfig) {
        self.config = config;
        self.reset();
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.name() == name)
    }

    /// Mutable access to an event; discards the current schedules.
    pub fn event_mut(&mut self, name: &str) -> Option<&mut Event> {
        self.reset();
        self.events.iter_mut().find(|e| e.name() == name)
    }

    /// # Errors
    ///
    /// Returns `InvalidArgument` if an event with the same name exists.
    pub fn add_event(&mut self, event: Event) -> Result<()> {
        if self.event(event.name()).is_some() {
            return Err(CourtForgeError::InvalidArgument(format!(
                "duplicate event name {}",
                event.name()
            )));
        }
        self.events.push(event);
        self.reset();
        Ok(())
    }

    pub fn index(&self) -> TournamentIndex {
        TournamentIndex::new(&self.events)
    }

    pub fn all_players(&self) -> Vec<Player> {
        self.index().players().to_vec()
    }

    pub fn all_localizations(&self) -> Vec<Localization> {
        self.index().localizations().to_vec()
    }

    pub fn all_timeslots(&self) -> Vec<Timeslot> {
        self.index().timeslots().to_vec()
    }

    /// Adds a break to every event holding `timeslot`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no event holds it.
    pub fn add_break(&mut self, timeslot: &Timeslot) -> Result<()> {
        self.for_each_event(
            |e| e.contains_timeslot(timeslot),
            |e| e.add_break(timeslot),
            || format!("no event holds timeslot {timeslot}"),
        )
    }

    /// Marks `player` unavailable at `timeslot` in every event holding both.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no event holds both.
    pub fn add_unavailable_player(&mut self, player: &Player, timeslot: &Timeslot) -> Result<()> {
        self.for_each_event(
            |e| e.contains_player(player) && e.contains_timeslot(timeslot),
            |e| e.add_unavailable_player(player, timeslot),
            || format!("no event holds player {player} at timeslot {timeslot}"),
        )
    }

    /// Marks `localization` unavailable at `timeslot` in every event holding
    /// both.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if no event holds both.
    pub fn add_unavailable_localization(
        &mut self,
        localization: &Localization,
        timeslot: &Timeslot,
    ) -> Result<()> {
        self.for_each_event(
            |e| e.contains_localization(localization) && e.contains_timeslot(timeslot),
            |e| e.add_unavailable_localization(localization, timeslot),
            || format!("no event holds localization {localization} at timeslot {timeslot}"),
        )
    }

    fn for_each_event(
        &mut self,
        applies: impl Fn(&Event) -> bool,
        mut apply: impl FnMut(&mut Event) -> Result<()>,
        missing: impl FnOnce() -> String,
    ) -> Result<()> {
        let mut applied = false;
        for event in self.events.iter_mut().filter(|e| applies(&**e)) {
            apply(event)?;
            applied = true;
        }
        if !applied {
            return Err(CourtForgeError::InvalidArgument(missing()));
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.solver = None;
        self.state = ScheduleState::NotYetSolved;
    }

    /// Validates the events, builds a fresh solver session and looks for a
    /// first solution.
    ///
    /// Returns false if none was found, either because the tournament is
    /// infeasible or because the search was stopped; the resolution data
    /// tells the two apart.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with every message if the events are invalid;
    /// the tournament is left unchanged.
    pub fn solve(&mut self) -> Result<bool> {
        let mut validator = TournamentValidator::new();
        if !validator.validate(&self.events) {
            return Err(CourtForgeError::Validation(validator.messages().to_vec()));
        }

        let mut solver = TournamentSolver::new(self.events.clone(), &self.config)
            .with_stop_flag(Arc::clone(&self.stop_flag));
        self.state = ScheduleState::NotYetSolved;
        let found = solver.execute();
        self.solver = Some(solver);
        if !found {
            debug!(tournament = %self.name, "no first solution");
            return Ok(false);
        }
        self.next_schedules()
    }

    /// Replaces the schedules with those of the next solution.
    ///
    /// Returns false, and clears the schedules, when there is none. Once
    /// exhausted, further calls keep returning false. If the time limit or
    /// the stop flag ended the request, calling again resumes the search.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if [`solve`](Self::solve) was never called.
    pub fn next_schedules(&mut self) -> Result<bool> {
        let solver = self.solver.as_mut().ok_or_else(|| {
            CourtForgeError::InvalidState(format!("tournament {} has not been solved", self.name))
        })?;
        match solver.advance()? {
            Some(events) => {
                let tournament = TournamentSchedule::new(
                    self.name.clone(),
                    &TournamentIndex::new(&self.events),
                    &events,
                );
                self.state = ScheduleState::HasSolution { events, tournament };
                Ok(true)
            }
            None => {
                self.state = match solver.state() {
                    SolverState::Exhausted => ScheduleState::Exhausted,
                    _ => ScheduleState::NotYetSolved,
                };
                Ok(false)
            }
        }
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    pub fn solver_state(&self) -> Option<SolverState> {
        self.solver.as_ref().map(TournamentSolver::state)
    }

    pub fn resolution_data(&self) -> Option<&ResolutionData> {
        self.solver.as_ref().map(TournamentSolver::resolution_data)
    }

    /// Flag that stops a running search when set. It stays set until the
    /// caller clears it.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Merged player view of the current solution.
    pub fn schedule(&self) -> Option<&TournamentSchedule> {
        match &self.state {
            ScheduleState::HasSolution { tournament, .. } => Some(tournament),
            _ => None,
        }
    }

    pub fn event_schedules(&self) -> Option<&[EventSchedule]> {
        match &self.state {
            ScheduleState::HasSolution { events, .. } => Some(events),
            _ => None,
        }
    }

    pub fn event_schedule(&self, name: &str) -> Option<&EventSchedule> {
        let position = self.events.iter().position(|e| e.name() == name)?;
        self.event_schedules()?.get(position)
    }

    /// Localization view of the current solution over every event.
    pub fn localization_schedule(&self) -> Option<LocalizationSchedule> {
        let schedules = self.event_schedules()?;
        Some(LocalizationSchedule::for_tournament(
            self.name.clone(),
            &self.index(),
            &self.events,
            schedules,
        ))
    }

    /// Localization view of one event of the current solution.
    pub fn event_localization_schedule(&self, name: &str) -> Option<LocalizationSchedule> {
        let event = self.event(name)?;
        let schedule = self.event_schedule(name)?;
        Some(LocalizationSchedule::for_event(event, schedule))
    }
}
