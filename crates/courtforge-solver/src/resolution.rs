//! Metadata of a resolution attempt.

use std::fmt;
use std::time::Duration;

/// Whether the model is known to have a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feasibility {
    /// Not tested yet, or the search stopped before deciding.
    #[default]
    Undefined,
    True,
    False,
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feasibility::Undefined => write!(f, "undefined"),
            Feasibility::True => write!(f, "true"),
            Feasibility::False => write!(f, "false"),
        }
    }
}

/// Read-only record of the last resolution attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionData {
    pub(crate) strategy: String,
    pub(crate) solutions: u64,
    pub(crate) feasibility: Feasibility,
    pub(crate) variables: usize,
    pub(crate) constraints: usize,
    pub(crate) build_duration: Duration,
    pub(crate) resolution_duration: Duration,
}

impl ResolutionData {
    pub(crate) fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    /// Solutions found so far.
    pub fn solutions(&self) -> u64 {
        self.solutions
    }

    pub fn feasibility(&self) -> Feasibility {
        self.feasibility
    }

    pub fn variables(&self) -> usize {
        self.variables
    }

    pub fn constraints(&self) -> usize {
        self.constraints
    }

    /// Time spent encoding the model and posting constraints.
    pub fn build_duration(&self) -> Duration {
        self.build_duration
    }

    /// Time spent searching, over every solution request.
    pub fn resolution_duration(&self) -> Duration {
        self.resolution_duration
    }
}

impl fmt::Display for ResolutionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Strategy: {}", self.strategy)?;
        writeln!(f, "Solutions: {}", self.solutions)?;
        writeln!(f, "Feasible: {}", self.feasibility)?;
        writeln!(
            f,
            "Model: {} variables, {} constraints",
            self.variables, self.constraints
        )?;
        writeln!(f, "Build time: {:.3}s", self.build_duration.as_secs_f64())?;
        write!(
            f,
            "Resolution time: {:.3}s",
            self.resolution_duration.as_secs_f64()
        )
    }
}
