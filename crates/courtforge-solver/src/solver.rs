//! Solving and enumeration controller.

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use courtforge_config::SolverConfig;
use courtforge_core::{CourtForgeError, Event, Result};
use tracing::{debug, info};

use crate::constraint::{catalog, post_all, PostingContext};
use crate::encoder::{encode, EventVariables};
use crate::engine::{request_termination, Model, Search, SearchOutcome, Var};
use crate::extraction::{extract_matches, Occupancy};
use crate::resolution::{Feasibility, ResolutionData};
use crate::schedule::EventSchedule;
use crate::strategy::SearchStrategy;

/// Lifecycle of a solver session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverState {
    #[default]
    Created,
    /// Variables encoded and constraints posted.
    Built,
    Searching,
    /// A solution is available.
    Solved,
    /// The model has no solution.
    Infeasible,
    /// The time limit or the stop flag ended the last request.
    TimeLimited,
    /// Every solution has been enumerated.
    Exhausted,
}

impl fmt::Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverState::Created => "created",
            SolverState::Built => "built",
            SolverState::Searching => "searching",
            SolverState::Solved => "solved",
            SolverState::Infeasible => "infeasible",
            SolverState::TimeLimited => "time limited",
            SolverState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// A solver session over a fixed list of events.
///
/// [`execute`](Self::execute) builds a fresh model and looks for a first
/// solution; [`advance`](Self::advance) materializes it, then pulls the
/// following ones until the search space is exhausted.
#[derive(Debug)]
pub struct TournamentSolver {
    events: Vec<Event>,
    strategy: SearchStrategy,
    time_limit: Option<Duration>,
    stop_flag: Arc<AtomicBool>,
    state: SolverState,
    search: Option<Search>,
    variables: Vec<EventVariables>,
    materialized: bool,
    resolution: ResolutionData,
}

impl TournamentSolver {
    pub fn new(events: Vec<Event>, config: &SolverConfig) -> Self {
        let strategy = SearchStrategy::from_config(&config.search);
        Self {
            events,
            strategy,
            time_limit: config.time_limit(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            state: SolverState::Created,
            search: None,
            variables: Vec::new(),
            materialized: false,
            resolution: ResolutionData::new(strategy.name()),
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self.resolution = ResolutionData::new(strategy.name());
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Changes the limit applied to each following solution request.
    pub fn set_time_limit(&mut self, limit: Option<Duration>) {
        self.time_limit = limit;
    }

    /// Shares a cancellation flag with the caller; setting it stops the
    /// running request at the engine's next termination check.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = flag;
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn resolution_data(&self) -> &ResolutionData {
        &self.resolution
    }

    /// Builds a fresh model and searches for a first solution.
    ///
    /// Returns true if one was found. Counters and any previous solution
    /// are discarded.
    pub fn execute(&mut self) -> bool {
        info!(
            event = "solve_start",
            events = self.events.len(),
            strategy = self.strategy.name(),
        );
        self.resolution = ResolutionData::new(self.strategy.name());
        self.materialized = false;
        self.search = None;
        self.variables.clear();
        self.state = SolverState::Created;

        if !self.build() {
            self.state = SolverState::Infeasible;
            self.resolution.feasibility = Feasibility::False;
            self.log_end();
            return false;
        }

        self.state = SolverState::Searching;
        let found = self.search_next();
        self.log_end();
        found
    }

    /// Returns the schedules of the next solution, or `None` once there are
    /// no more.
    ///
    /// The first call after a successful [`execute`](Self::execute) returns
    /// the solution it found. A request ended by the time limit or the stop
    /// flag returns `None` with the state `TimeLimited`; the next call
    /// resumes the enumeration where it stopped. After exhaustion every call
    /// returns `None`.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if a solution cannot be decoded into matches.
    pub fn advance(&mut self) -> Result<Option<Vec<EventSchedule>>> {
        match self.state {
            SolverState::Solved if !self.materialized => {
                self.materialized = true;
                return self.materialize().map(Some);
            }
            SolverState::Solved | SolverState::TimeLimited => {}
            _ => return Ok(None),
        }
        if self.search_next() {
            self.materialized = true;
            self.materialize().map(Some)
        } else {
            Ok(None)
        }
    }

    fn build(&mut self) -> bool {
        let started = Instant::now();
        let mut model = Model::new();
        let variables = encode(&mut model, &self.events);

        let generators = catalog(&self.events);
        let mut ctx = PostingContext {
            model: &mut model,
            events: &self.events,
            vars: &variables,
        };
        post_all(&generators, &mut ctx);

        self.resolution.variables = model.num_variables();
        self.resolution.constraints = model.num_constraints();
        self.resolution.build_duration = started.elapsed();
        info!(
            event = "model_built",
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            generators = generators.len(),
            duration_ms = self.resolution.build_duration.as_millis() as u64,
        );
        if !model.is_consistent() {
            debug!("constraints conflict before search");
            return false;
        }

        let recorded: Vec<Var> = variables
            .iter()
            .flat_map(|vars| vars.all_x().iter().copied())
            .collect();
        let strategy = self.strategy;
        let search = model.into_search(recorded, |solver| strategy.brancher(solver, &variables));
        self.search = Some(search);
        self.variables = variables;
        self.state = SolverState::Built;
        true
    }

    fn search_next(&mut self) -> bool {
        let Some(search) = self.search.as_mut() else {
            return false;
        };
        let mut termination = request_termination(self.time_limit, &self.stop_flag);

        let started = Instant::now();
        let outcome = search.next_solution(&mut termination);
        let elapsed = started.elapsed();
        self.resolution.resolution_duration += elapsed;
        self.resolution.solutions = search.solutions();
        let solutions = search.solutions();
        let duration_ms = elapsed.as_millis() as u64;

        match outcome {
            SearchOutcome::Solution => {
                self.state = SolverState::Solved;
                self.resolution.feasibility = Feasibility::True;
                info!(event = "solution_found", solution = solutions, duration_ms);
                true
            }
            SearchOutcome::Exhausted => {
                if solutions == 0 {
                    self.state = SolverState::Infeasible;
                    self.resolution.feasibility = Feasibility::False;
                } else {
                    self.state = SolverState::Exhausted;
                }
                info!(event = "search_exhausted", solutions, duration_ms);
                false
            }
            SearchOutcome::Stopped => {
                self.state = SolverState::TimeLimited;
                info!(event = "search_stopped", solutions, duration_ms);
                false
            }
        }
    }

    fn materialize(&self) -> Result<Vec<EventSchedule>> {
        let search = self
            .search
            .as_ref()
            .ok_or_else(|| CourtForgeError::Internal("no search to read".to_string()))?;
        self.events
            .iter()
            .zip(&self.variables)
            .map(|(event, vars)| {
                let occupancy = occupancy(search, vars)?;
                let matches = extract_matches(event, &occupancy)?;
                Ok(EventSchedule::new(event, matches))
            })
            .collect()
    }

    fn log_end(&self) {
        info!(
            event = "solve_end",
            state = %self.state,
            feasibility = %self.resolution.feasibility,
            solutions = self.resolution.solutions,
            variables = self.resolution.variables,
            constraints = self.resolution.constraints,
            duration_ms = self.resolution.resolution_duration.as_millis() as u64,
        );
    }
}

/// Reads the localization each player occupies at each timeslot.
fn occupancy(search: &Search, vars: &EventVariables) -> Result<Occupancy> {
    let mut rows = vec![vec![None; vars.timeslots()]; vars.players()];
    for (p, row) in rows.iter_mut().enumerate() {
        for (t, cell) in row.iter_mut().enumerate() {
            for c in 0..vars.localizations() {
                match search.value(vars.x(p, c, t)) {
                    Some(1) => *cell = Some(c),
                    Some(_) => {}
                    None => {
                        return Err(CourtForgeError::Internal(format!(
                            "x[{p}][{c}][{t}] has no value in the current solution"
                        )))
                    }
                }
            }
        }
    }
    Ok(rows)
}
