//! Search strategies.

use std::fmt;

use courtforge_config::{SearchConfig, SearchStrategyType, ValueChoice, VariableOrder};
use pumpkin_core::branching::branchers::dynamic_brancher::DynamicBrancher;
use pumpkin_core::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use pumpkin_core::branching::value_selection::{InDomainMax, InDomainMin};
use pumpkin_core::branching::variable_selection::FirstFail;
use pumpkin_core::branching::Brancher;
use pumpkin_core::Solver;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::encoder::EventVariables;
use crate::engine::Var;

/// How the solver picks its next decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Smallest domain first with random tie-breaking; the engine's
    /// conflict learning weighs the variables that keep failing. Uses the
    /// seed when given, a fresh one per run otherwise.
    DomOverWDeg { seed: Option<u64> },
    /// Smallest domain first, trying the chosen bound first, over the
    /// occupancy variables laid out in `order`.
    MinDom {
        value: ValueChoice,
        order: VariableOrder,
    },
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::DomOverWDeg { seed: None }
    }
}

impl SearchStrategy {
    pub fn from_config(config: &SearchConfig) -> Self {
        match config.strategy {
            SearchStrategyType::DomOverWDeg => SearchStrategy::DomOverWDeg {
                seed: config.random_seed,
            },
            SearchStrategyType::MinDom => SearchStrategy::MinDom {
                value: config.value_choice,
                order: config.variable_order,
            },
        }
    }

    /// Deterministic min-domain strategy over player-major occupancy.
    pub fn min_dom(value: ValueChoice) -> Self {
        SearchStrategy::MinDom {
            value,
            order: VariableOrder::PlayerMajor,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchStrategy::DomOverWDeg { .. } => "DomOverWDeg",
            SearchStrategy::MinDom { value, order } => match (value, order) {
                (ValueChoice::LowerBound, VariableOrder::PlayerMajor) => "MinDomLB",
                (ValueChoice::UpperBound, VariableOrder::PlayerMajor) => "MinDomUB",
                (ValueChoice::LowerBound, VariableOrder::CourtMajor) => "MinDomLB (court major)",
                (ValueChoice::UpperBound, VariableOrder::CourtMajor) => "MinDomUB (court major)",
                (ValueChoice::LowerBound, VariableOrder::TimeslotMajor) => {
                    "MinDomLB (timeslot major)"
                }
                (ValueChoice::UpperBound, VariableOrder::TimeslotMajor) => {
                    "MinDomUB (timeslot major)"
                }
            },
        }
    }

    /// Builds the brancher over the occupancy variables of every event,
    /// events in order. The engine's default brancher follows to fix
    /// anything propagation left open.
    pub(crate) fn brancher(&self, solver: &Solver, vars: &[EventVariables]) -> DynamicBrancher {
        let decisions: Box<dyn Brancher> = match *self {
            SearchStrategy::DomOverWDeg { seed } => {
                let mut order: Vec<Var> =
                    vars.iter().flat_map(|v| v.all_x().iter().copied()).collect();
                let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random));
                order.shuffle(&mut rng);
                Box::new(IndependentVariableValueBrancher::new(
                    FirstFail::new(&order),
                    InDomainMin,
                ))
            }
            SearchStrategy::MinDom { value, order } => {
                let order: Vec<Var> = vars.iter().flat_map(|v| v.ordered_x(order)).collect();
                match value {
                    ValueChoice::LowerBound => Box::new(IndependentVariableValueBrancher::new(
                        FirstFail::new(&order),
                        InDomainMin,
                    )),
                    ValueChoice::UpperBound => Box::new(IndependentVariableValueBrancher::new(
                        FirstFail::new(&order),
                        InDomainMax,
                    )),
                }
            }
        };
        DynamicBrancher::new(vec![decisions, Box::new(solver.default_brancher())])
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtforge_config::SolverConfig;

    #[test]
    fn test_from_config() {
        let config = SolverConfig::new()
            .with_strategy(SearchStrategyType::MinDom)
            .with_value_choice(ValueChoice::UpperBound)
            .with_variable_order(VariableOrder::TimeslotMajor);
        let strategy = SearchStrategy::from_config(&config.search);
        assert_eq!(strategy.name(), "MinDomUB (timeslot major)");

        let seeded = SearchStrategy::from_config(&SolverConfig::new().with_random_seed(9).search);
        assert_eq!(seeded, SearchStrategy::DomOverWDeg { seed: Some(9) });
        assert_eq!(seeded.to_string(), "DomOverWDeg");
    }

    #[test]
    fn test_default_is_weighted_degree() {
        assert_eq!(SearchStrategy::default().name(), "DomOverWDeg");
        assert_eq!(
            SearchStrategy::min_dom(ValueChoice::LowerBound).name(),
            "MinDomLB"
        );
    }
}
