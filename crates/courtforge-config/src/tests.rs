//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [search]
        strategy = "dom_over_w_deg"
        random_seed = 42

        [termination]
        seconds_spent_limit = 30
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.search.strategy, SearchStrategyType::DomOverWDeg);
    assert_eq!(config.search.random_seed, Some(42));
    assert_eq!(config.termination.unwrap().seconds_spent_limit, Some(30));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        search:
          strategy: min_dom
          value_choice: upper_bound
          variable_order: timeslot_major
        termination:
          millis_spent_limit: 250
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.search.strategy, SearchStrategyType::MinDom);
    assert_eq!(config.search.value_choice, ValueChoice::UpperBound);
    assert_eq!(config.search.variable_order, VariableOrder::TimeslotMajor);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.search.variable_order, VariableOrder::PlayerMajor);
}

#[test]
fn test_limits_add_up() {
    let config = SolverConfig::new()
        .with_termination_seconds(2)
        .with_termination_millis(500);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(2500)));
}

#[test]
fn test_zero_limit_is_invalid() {
    let result = SolverConfig::from_toml_str(
        r#"
        [termination]
        seconds_spent_limit = 0
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let result = SolverConfig::from_toml_str(
        r#"
        [search]
        strategy = "simulated_annealing"
    "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = SolverConfig::load("does/not/exist.toml").unwrap_or_default();
    assert_eq!(config, SolverConfig::default());
    assert!(matches!(
        SolverConfig::load("does/not/exist.yaml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_strategy(SearchStrategyType::MinDom)
        .with_value_choice(ValueChoice::UpperBound)
        .with_variable_order(VariableOrder::CourtMajor)
        .with_random_seed(123);

    assert_eq!(config.search.strategy, SearchStrategyType::MinDom);
    assert_eq!(config.search.random_seed, Some(123));
}
