//! Termination conditions handed to the engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pumpkin_core::termination::{TerminationCondition, TimeBudget};

/// Stops the search when a shared flag is set.
///
/// The flag is only read; clearing it is up to whoever set it.
#[derive(Debug, Clone)]
pub struct StopFlag {
    flag: Arc<AtomicBool>,
}

impl StopFlag {
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for StopFlag {
    fn should_stop(&mut self) -> bool {
        self.is_set()
    }
}

/// Termination of a single solution request: an optional wall-clock
/// budget starting now, or the stop flag, whichever fires first.
pub struct RequestTermination {
    budget: Option<TimeBudget>,
    stop: StopFlag,
}

impl TerminationCondition for RequestTermination {
    fn should_stop(&mut self) -> bool {
        self.stop.should_stop() || self.budget.as_mut().is_some_and(|b| b.should_stop())
    }
}

/// Builds the termination of one solution request.
pub fn request_termination(
    time_limit: Option<Duration>,
    flag: &Arc<AtomicBool>,
) -> RequestTermination {
    RequestTermination {
        budget: time_limit.map(TimeBudget::starting_now),
        stop: StopFlag::new(Arc::clone(flag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_is_shared() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut stop = StopFlag::new(Arc::clone(&flag));
        assert!(!stop.should_stop());
        flag.store(true, Ordering::SeqCst);
        assert!(stop.should_stop());
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_request_without_limit_runs_until_flagged() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut termination = request_termination(None, &flag);
        assert!(!termination.should_stop());
        flag.store(true, Ordering::SeqCst);
        assert!(termination.should_stop());
    }

    #[test]
    fn test_zero_budget_is_spent_immediately() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut termination = request_termination(Some(Duration::ZERO), &flag);
        assert!(termination.should_stop());

        let mut generous = request_termination(Some(Duration::from_secs(3600)), &flag);
        assert!(!generous.should_stop());
    }
}
