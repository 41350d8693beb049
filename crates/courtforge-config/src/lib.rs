//! Configuration system for CourtForge.
//!
//! Load solver configuration from TOML or YAML files to choose the search
//! strategy and time limit without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use courtforge_config::{SearchStrategyType, SolverConfig, VariableOrder};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [search]
//!     strategy = "min_dom"
//!     value_choice = "upper_bound"
//!     variable_order = "court_major"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.search.strategy, SearchStrategyType::MinDom);
//! assert_eq!(config.search.variable_order, VariableOrder::CourtMajor);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when the file is missing:
//!
//! ```
//! use courtforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("courtforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Search strategy configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension
    /// (`.yaml`/`.yml` for YAML, TOML otherwise).
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, cannot be parsed or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(termination) = &self.termination {
            if termination.seconds_spent_limit == Some(0)
                || termination.millis_spent_limit == Some(0)
            {
                return Err(ConfigError::Invalid(
                    "time limits must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategyType) -> Self {
        self.search.strategy = strategy;
        self
    }

    /// Sets the value choice of the min-domain strategy.
    pub fn with_value_choice(mut self, value_choice: ValueChoice) -> Self {
        self.search.value_choice = value_choice;
        self
    }

    /// Sets the order of decision variables of the min-domain strategy.
    pub fn with_variable_order(mut self, order: VariableOrder) -> Self {
        self.search.variable_order = order;
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.search.random_seed = Some(seed);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use courtforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     millis_spent_limit = 1500
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(1500)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Variable selection heuristic.
    #[serde(default)]
    pub strategy: SearchStrategyType,

    /// Bound tried first by the min-domain strategy.
    #[serde(default)]
    pub value_choice: ValueChoice,

    /// Order of the decision variables of the min-domain strategy.
    #[serde(default)]
    pub variable_order: VariableOrder,

    /// Random seed for the weighted-degree strategy; a fresh one is drawn
    /// for every run when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Variable selection heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategyType {
    /// Smallest domain over weighted degree, random tie-breaking.
    #[default]
    DomOverWDeg,

    /// Smallest domain, deterministic.
    MinDom,
}

/// Bound tried first when branching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueChoice {
    #[default]
    LowerBound,
    UpperBound,
}

/// Order in which occupancy variables are laid out for branching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableOrder {
    /// Player, then court, then timeslot.
    #[default]
    PlayerMajor,

    /// Court, then timeslot, then player.
    CourtMajor,

    /// Timeslot, then court, then player.
    TimeslotMajor,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend on one solution request.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend on one solution request.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any. Both fields add up.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self.seconds_spent_limit.unwrap_or(0) * 1000
            + self.millis_spent_limit.unwrap_or(0);
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
