//! # Crash-loop budget for the worker's attempt loop.
//!
//! [`RestartBudget`] tracks consecutive quick failures and answers one
//! question after every exit of the managed process: retry after the
//! configured delay, or give up.
//!
//! ```text
//! exit observed
//!   ├─ ever started (survived the healthy threshold at least once)
//!   │     └─► attempt = 0, Retry { delay }    (fresh budget, any limit)
//!   └─ never started
//!         ├─ attempt + 1 < max_attempts ─► Retry { delay }
//!         └─ attempt + 1 ≥ max_attempts ─► GiveUp   (crash loop exhausted)
//! ```
//!
//! The worker consults [`RestartBudget::is_exhausted`] before every launch,
//! so a budget that starts out empty (`max_attempts = 0`) allows no attempt
//! at all.
//!
//! ## Rules
//! - `ever_started` is sticky: once one attempt survives the healthy
//!   threshold, every later exit resets the attempt counter. A long-lived
//!   process that eventually crashes always gets a fresh budget.
//! - The budget never launches, sleeps, or reports; the worker owns those
//!   side effects.

use std::time::Duration;

use crate::config::Config;

/// What the worker should do after the managed process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Sleep `delay`, then launch the next attempt.
    Retry {
        /// Delay before the next launch.
        delay: Duration,
    },
    /// The crash-loop budget is exhausted; exit the attempt loop.
    GiveUp,
}

/// Bounded budget of consecutive quick failures, owned by one worker run.
#[derive(Debug, Clone)]
pub struct RestartBudget {
    attempt: u32,
    max_attempts: u32,
    retry_delay: Duration,
    ever_started: bool,
}

impl RestartBudget {
    /// Creates a budget with the given limits. `ever_started` starts false.
    pub fn new(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            retry_delay,
            ever_started: false,
        }
    }

    /// Creates a budget from the supervisor configuration.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.max_attempts, cfg.retry_delay)
    }

    /// Marks that an attempt survived the healthy threshold.
    ///
    /// Returns the previous value, so the caller can tell a first start from
    /// a restart of an already-healthy service.
    pub fn mark_started(&mut self) -> bool {
        std::mem::replace(&mut self.ever_started, true)
    }

    /// True once any attempt has survived the healthy threshold.
    pub fn ever_started(&self) -> bool {
        self.ever_started
    }

    /// Current consecutive-quick-failure count.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Configured limit on consecutive quick failures.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// True when no (further) attempt is allowed: the limit is reached and
    /// no attempt has ever survived the healthy threshold. Checked before
    /// every launch.
    pub fn is_exhausted(&self) -> bool {
        !self.ever_started && self.attempt >= self.max_attempts
    }

    /// Records one exit of the managed process and decides the next action.
    ///
    /// A healthy history (`ever_started`) resets the counter and always
    /// yields a retry, whatever the limit; otherwise the counter advances
    /// and the budget gives up once it reaches `max_attempts`.
    pub fn on_exit(&mut self) -> Decision {
        if self.ever_started {
            self.attempt = 0;
            return Decision::Retry {
                delay: self.retry_delay,
            };
        }
        self.attempt += 1;
        if self.attempt < self.max_attempts {
            Decision::Retry {
                delay: self.retry_delay,
            }
        } else {
            Decision::GiveUp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn gives_up_after_exactly_max_attempts_quick_failures() {
        let mut budget = RestartBudget::new(3, DELAY);

        assert!(!budget.is_exhausted());
        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
        assert_eq!(budget.on_exit(), Decision::GiveUp);
        assert_eq!(budget.attempt(), 3);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn healthy_history_resets_the_counter() {
        let mut budget = RestartBudget::new(3, DELAY);

        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });

        // One attempt survives the threshold before the budget runs out.
        assert!(!budget.mark_started());
        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
        assert_eq!(budget.attempt(), 0);
    }

    #[test]
    fn once_started_the_budget_never_exhausts() {
        let mut budget = RestartBudget::new(3, DELAY);
        budget.mark_started();

        for _ in 0..100 {
            assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
            assert_eq!(budget.attempt(), 0);
        }
    }

    #[test]
    fn mark_started_reports_previous_value() {
        let mut budget = RestartBudget::new(3, DELAY);
        assert!(!budget.mark_started());
        assert!(budget.mark_started());
        assert!(budget.ever_started());
    }

    #[test]
    fn zero_budget_gives_up_immediately() {
        let mut budget = RestartBudget::new(1, DELAY);
        assert_eq!(budget.on_exit(), Decision::GiveUp);
    }

    #[test]
    fn empty_budget_is_exhausted_before_any_attempt() {
        let budget = RestartBudget::new(0, DELAY);
        assert!(budget.is_exhausted());
    }

    #[test]
    fn healthy_history_overrides_even_an_empty_limit() {
        let mut budget = RestartBudget::new(0, DELAY);
        budget.mark_started();
        assert!(!budget.is_exhausted());
        assert_eq!(budget.on_exit(), Decision::Retry { delay: DELAY });
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn retry_carries_the_configured_delay() {
        let delay = Duration::from_millis(50);
        let mut budget = RestartBudget::new(2, delay);
        assert_eq!(budget.on_exit(), Decision::Retry { delay });
    }
}
