//! Crawl-level state machine
//!
//! A crawl is `Running` until it stops exactly once, carrying the reason it
//! stopped.

use crate::GleanError;
use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The number of results reached the page budget
    BudgetReached,
    /// The frontier emptied before the budget was spent
    FrontierExhausted,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetReached => "budget_reached",
            Self::FrontierExhausted => "frontier_exhausted",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlState {
    #[default]
    Running,
    Terminated(TerminationReason),
}

impl CrawlState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// The termination reason, if the crawl has stopped
    pub fn reason(&self) -> Option<TerminationReason> {
        match self {
            Self::Running => None,
            Self::Terminated(reason) => Some(*reason),
        }
    }

    /// Moves `Running` to `Terminated(reason)`
    ///
    /// # Errors
    ///
    /// Returns `GleanError::InvalidTransition` if the crawl already stopped.
    pub fn terminate(&mut self, reason: TerminationReason) -> Result<(), GleanError> {
        match self {
            Self::Running => {
                *self = Self::Terminated(reason);
                Ok(())
            }
            Self::Terminated(_) => Err(GleanError::InvalidTransition {
                from: *self,
                to: Self::Terminated(reason),
            }),
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Terminated(reason) => write!(f, "terminated({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_running() {
        let state = CrawlState::default();
        assert!(state.is_running());
        assert_eq!(state.reason(), None);
    }

    #[test]
    fn test_terminate_once() {
        let mut state = CrawlState::Running;
        state.terminate(TerminationReason::BudgetReached).unwrap();

        assert!(!state.is_running());
        assert_eq!(state.reason(), Some(TerminationReason::BudgetReached));
    }

    #[test]
    fn test_terminate_twice_fails() {
        let mut state = CrawlState::Running;
        state.terminate(TerminationReason::FrontierExhausted).unwrap();

        let result = state.terminate(TerminationReason::BudgetReached);
        assert!(matches!(
            result,
            Err(GleanError::InvalidTransition { .. })
        ));
        assert_eq!(state.reason(), Some(TerminationReason::FrontierExhausted));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlState::Running.to_string(), "running");
        assert_eq!(
            CrawlState::Terminated(TerminationReason::BudgetReached).to_string(),
            "terminated(budget_reached)"
        );
        assert_eq!(
            TerminationReason::FrontierExhausted.to_string(),
            "frontier_exhausted"
        );
    }
}
