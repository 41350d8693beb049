//! Adapter over the Pumpkin constraint solver.
//!
//! [`Model`] collects boolean variables and the few constraint shapes the
//! catalog needs (linear sums, minimum, equality). [`Search`] owns the
//! solver once the model is complete and hands out one solution per
//! request; every solution found is excluded by a nogood over the recorded
//! variables before the next request runs.

mod termination;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt;

use pumpkin_core::branching::branchers::dynamic_brancher::DynamicBrancher;
use pumpkin_core::constraints;
use pumpkin_core::results::{ProblemSolution, SatisfactionResult};
use pumpkin_core::termination::TerminationCondition;
use pumpkin_core::variables::{AffineView, DomainId, TransformableVariable};
use pumpkin_core::Solver;
use tracing::debug;

pub use termination::{request_termination, RequestTermination, StopFlag};

/// Engine variable. Every decision variable of the encoding is 0/1.
pub type Var = DomainId;

/// Right-hand side of a posted sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumTarget {
    Exactly(i32),
    AtMost(i32),
    Between(i32, i32),
}

impl SumTarget {
    fn admits(&self, value: i32) -> bool {
        match *self {
            SumTarget::Exactly(k) => value == k,
            SumTarget::AtMost(k) => value <= k,
            SumTarget::Between(lo, hi) => lo <= value && value <= hi,
        }
    }
}

/// Variables and constraints under construction.
pub struct Model {
    solver: Solver,
    variables: usize,
    constraints: usize,
    consistent: bool,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("variables", &self.variables)
            .field("constraints", &self.constraints)
            .field("consistent", &self.consistent)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            solver: Solver::default(),
            variables: 0,
            constraints: 0,
            consistent: true,
        }
    }

    /// A 0/1 variable, or a variable fixed to 0 when `open` is false.
    pub fn new_bool(&mut self, open: bool) -> Var {
        self.variables += 1;
        self.solver.new_bounded_integer(0, i32::from(open))
    }

    pub fn num_variables(&self) -> usize {
        self.variables
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints
    }

    /// False once a posted constraint failed at the root: the model has no
    /// solution.
    pub fn is_consistent(&self) -> bool {
        self.consistent
    }

    /// `Σ vars` meets `target`.
    pub fn sum(&mut self, vars: &[Var], target: SumTarget) {
        let terms: Vec<(i32, Var)> = vars.iter().map(|&var| (1, var)).collect();
        self.linear(&terms, target);
    }

    /// `Σ coefficient · var` meets `target`.
    pub fn linear(&mut self, terms: &[(i32, Var)], target: SumTarget) {
        if terms.is_empty() {
            if !target.admits(0) {
                debug!(?target, "empty sum cannot meet its target");
                self.consistent = false;
            }
            return;
        }
        match target {
            SumTarget::Exactly(k) => {
                let tag = self.solver.new_constraint_tag();
                let ok = self
                    .solver
                    .add_constraint(constraints::equals(scaled(terms, 1), k, tag))
                    .post()
                    .is_ok();
                self.record(ok);
            }
            SumTarget::AtMost(k) => self.at_most(terms, 1, k),
            SumTarget::Between(lo, hi) => {
                self.at_most(terms, 1, hi);
                self.at_most(terms, -1, -lo);
            }
        }
    }

    fn at_most(&mut self, terms: &[(i32, Var)], sign: i32, rhs: i32) {
        let tag = self.solver.new_constraint_tag();
        let ok = self
            .solver
            .add_constraint(constraints::less_than_or_equals(
                scaled(terms, sign),
                rhs,
                tag,
            ))
            .post()
            .is_ok();
        self.record(ok);
    }

    /// `a = b`.
    pub fn equal(&mut self, a: Var, b: Var) {
        let tag = self.solver.new_constraint_tag();
        let ok = self
            .solver
            .add_constraint(constraints::binary_equals(a, b, tag))
            .post()
            .is_ok();
        self.record(ok);
    }

    /// `rhs = min(vars)`.
    pub fn minimum(&mut self, rhs: Var, vars: &[Var]) {
        let tag = self.solver.new_constraint_tag();
        let ok = self
            .solver
            .add_constraint(constraints::minimum(vars.to_vec(), rhs, tag))
            .post()
            .is_ok();
        self.record(ok);
    }

    /// `var = value`.
    pub fn fix(&mut self, var: Var, value: i32) {
        self.linear(&[(1, var)], SumTarget::Exactly(value));
    }

    fn record(&mut self, ok: bool) {
        self.constraints += 1;
        if !ok && self.consistent {
            debug!(constraint = self.constraints, "root propagation failed");
            self.consistent = false;
        }
    }

    /// Consumes the model into a search over it.
    ///
    /// `brancher` builds the search strategy from the solver once every
    /// variable exists. `recorded` lists the variables read back from each
    /// solution and used to exclude it afterwards; they must determine
    /// every other variable of the model.
    pub fn into_search<F>(self, recorded: Vec<Var>, brancher: F) -> Search
    where
        F: FnOnce(&Solver) -> DynamicBrancher,
    {
        let brancher = brancher(&self.solver);
        Search {
            solver: self.solver,
            brancher,
            recorded,
            values: HashMap::new(),
            previous: None,
            exhausted: !self.consistent,
            solutions: 0,
            constraints: self.constraints,
        }
    }
}

fn scaled(terms: &[(i32, Var)], sign: i32) -> Vec<AffineView<DomainId>> {
    terms
        .iter()
        .map(|&(coefficient, var)| var.scaled(sign * coefficient))
        .collect()
}

/// Result of a solution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A new solution; read it with [`Search::value`].
    Solution,
    /// No further solution exists.
    Exhausted,
    /// The termination condition fired before a solution was found.
    Stopped,
}

enum Found {
    Solution(Vec<i32>),
    Unsatisfiable,
    Unknown,
}

/// A solver session enumerating distinct solutions of one model.
pub struct Search {
    solver: Solver,
    brancher: DynamicBrancher,
    recorded: Vec<Var>,
    values: HashMap<Var, i32>,
    previous: Option<Vec<i32>>,
    exhausted: bool,
    solutions: u64,
    constraints: usize,
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("recorded", &self.recorded.len())
            .field("solutions", &self.solutions)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

impl Search {
    /// Solutions found so far.
    pub fn solutions(&self) -> u64 {
        self.solutions
    }

    /// Constraints posted, exclusion nogoods included.
    pub fn constraints(&self) -> usize {
        self.constraints
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Value of a recorded variable in the last solution.
    pub fn value(&self, var: Var) -> Option<i32> {
        self.values.get(&var).copied()
    }

    /// Looks for a solution different from every one returned before.
    ///
    /// `termination` is checked before the solver starts and while it runs.
    /// A stopped request leaves the session usable: the next request picks
    /// up with the same exclusions. After `Exhausted` every further request
    /// returns `Exhausted` again.
    pub fn next_solution<T: TerminationCondition>(&mut self, termination: &mut T) -> SearchOutcome {
        if self.exhausted {
            return SearchOutcome::Exhausted;
        }
        if let Some(previous) = self.previous.take() {
            if !self.exclude(&previous) {
                return self.exhaust();
            }
        }
        self.values.clear();
        if termination.should_stop() {
            return SearchOutcome::Stopped;
        }

        let found = match self.solver.satisfy(&mut self.brancher, termination) {
            SatisfactionResult::Satisfiable(satisfiable) => {
                let solution = satisfiable.solution();
                Found::Solution(
                    self.recorded
                        .iter()
                        .map(|&var| solution.get_integer_value(var))
                        .collect(),
                )
            }
            SatisfactionResult::Unsatisfiable(..) => Found::Unsatisfiable,
            SatisfactionResult::Unknown(..) => Found::Unknown,
        };

        match found {
            Found::Solution(values) => {
                self.values = self.recorded.iter().copied().zip(values.iter().copied()).collect();
                self.previous = Some(values);
                self.solutions += 1;
                SearchOutcome::Solution
            }
            Found::Unsatisfiable => self.exhaust(),
            Found::Unknown => SearchOutcome::Stopped,
        }
    }

    /// Posts `Σ_{v=1} x - Σ_{v=0} x ≤ ones - 1`, which every assignment
    /// except `values` satisfies. Returns false if nothing else remains.
    fn exclude(&mut self, values: &[i32]) -> bool {
        if self.recorded.is_empty() {
            return false;
        }
        let ones = values.iter().filter(|&&value| value == 1).count() as i32;
        let terms: Vec<AffineView<DomainId>> = self
            .recorded
            .iter()
            .zip(values)
            .map(|(&var, &value)| var.scaled(if value == 1 { 1 } else { -1 }))
            .collect();
        let tag = self.solver.new_constraint_tag();
        self.constraints += 1;
        self.solver
            .add_constraint(constraints::less_than_or_equals(terms, ones - 1, tag))
            .post()
            .is_ok()
    }

    fn exhaust(&mut self) -> SearchOutcome {
        self.exhausted = true;
        self.values.clear();
        SearchOutcome::Exhausted
    }
}
