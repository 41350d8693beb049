//! Solver configurations for reproducible tests.

use courtforge_config::{SearchStrategyType, SolverConfig, ValueChoice};

/// Deterministic min-domain search trying 0 first.
pub fn lower_bound_config() -> SolverConfig {
    SolverConfig::new()
        .with_strategy(SearchStrategyType::MinDom)
        .with_value_choice(ValueChoice::LowerBound)
}

/// Weighted-degree search with a fixed seed and a 10 second limit.
pub fn seeded_config(seed: u64) -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(seed)
        .with_termination_seconds(10)
}
