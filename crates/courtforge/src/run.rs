//! Entry point that hides configuration and console wiring.

use courtforge_config::SolverConfig;
use courtforge_core::{Event, Result};
use courtforge_solver::Tournament;
use tracing::warn;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "courtforge.toml";

/// Builds a tournament, configures it from [`CONFIG_FILE`] when present and
/// solves it.
///
/// The returned tournament holds the first schedule if one was found; use
/// [`Tournament::next_schedules`] to enumerate more.
///
/// # Errors
///
/// Returns `InvalidArgument` for an invalid event list and `Validation` if
/// the events fail validation.
pub fn run_tournament(name: impl Into<String>, events: Vec<Event>) -> Result<Tournament> {
    #[cfg(feature = "console")]
    courtforge_console::init();

    let config = match SolverConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(courtforge_config::ConfigError::Io(_)) => SolverConfig::default(),
        Err(err) => {
            warn!(file = CONFIG_FILE, error = %err, "ignoring solver configuration");
            SolverConfig::default()
        }
    };

    let mut tournament = Tournament::new(name, events)?.with_config(config);
    tournament.solve()?;
    Ok(tournament)
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtforge_solver::Schedule;
    use courtforge_test::round_robin;

    #[test]
    fn test_run_tournament_solves() {
        let tournament = run_tournament("League", vec![round_robin(4)]).unwrap();
        let schedule = tournament.schedule().unwrap();
        assert_eq!(schedule.matches().len(), 6);
    }

    #[test]
    fn test_run_tournament_rejects_empty() {
        assert!(run_tournament("Empty", Vec::new()).is_err());
    }
}
