//! Cooperative per-phase budgets.
//!
//! A phase polls [`Budget::expired`] between iterations and never stops in
//! the middle of a move. Time limits give wall-clock control; iteration caps
//! give reproducible runs.

use std::time::{Duration, Instant};

/// A wall-clock and/or iteration allowance for one phase.
///
/// # Examples
///
/// ```
/// use u_carp::budget::Budget;
///
/// let mut budget = Budget::iterations(2);
/// assert!(!budget.expired());
/// budget.tick();
/// budget.tick();
/// assert!(budget.expired());
/// assert_eq!(budget.remaining_iterations(), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Budget {
    started: Instant,
    time_limit: Option<Duration>,
    max_iterations: Option<u64>,
    iterations: u64,
}

impl Budget {
    /// Creates a budget; `None` leaves that dimension unbounded.
    pub fn new(time_limit: Option<Duration>, max_iterations: Option<u64>) -> Self {
        Self {
            started: Instant::now(),
            time_limit,
            max_iterations,
            iterations: 0,
        }
    }

    /// Wall-clock budget only.
    pub fn time(limit: Duration) -> Self {
        Self::new(Some(limit), None)
    }

    /// Iteration budget only.
    pub fn iterations(max: u64) -> Self {
        Self::new(None, Some(max))
    }

    /// Never expires.
    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    /// Records one completed iteration.
    pub fn tick(&mut self) {
        self.iterations += 1;
    }

    /// Iterations recorded so far.
    pub fn iterations_done(&self) -> u64 {
        self.iterations
    }

    /// Time since the budget was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Remaining wall-clock time, or `None` if time is unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.time_limit
            .map(|limit| limit.saturating_sub(self.started.elapsed()))
    }

    /// Remaining iterations, or `None` if iterations are unbounded.
    pub fn remaining_iterations(&self) -> Option<u64> {
        self.max_iterations
            .map(|max| max.saturating_sub(self.iterations))
    }

    /// Returns `true` once either limit is reached.
    pub fn expired(&self) -> bool {
        if let Some(max) = self.max_iterations {
            if self.iterations >= max {
                return true;
            }
        }
        match self.time_limit {
            Some(limit) => self.started.elapsed() >= limit,
            None => false,
        }
    }
}
