//! Cooperative time management
//!
//! The search polls a [`Clock`] before exploring every sibling move. Once the
//! clock reports that time is running out it keeps reporting so, and the
//! search unwinds.

use std::time::{Duration, Instant};

/// Share of the budget the search may use; the rest covers call overhead
pub const DEFAULT_DEADLINE_FRACTION: f64 = 0.95;

/// Source of the "stop now" signal polled by the search
pub trait Clock {
    /// True once the search must stop. Must stay true after first returning true.
    fn is_running_out(&mut self) -> bool;
}

/// Wall-clock deadline at a fraction of the move budget
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
    soft_limit: Duration,
}

impl Deadline {
    /// Start the clock now for a move budget of `budget`
    pub fn start(budget: Duration, fraction: f64) -> Self {
        Self {
            start: Instant::now(),
            budget,
            soft_limit: budget.mul_f64(fraction.clamp(0.0, 1.0)),
        }
    }

    /// Full move budget
    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Clock for Deadline {
    #[inline]
    fn is_running_out(&mut self) -> bool {
        self.start.elapsed() >= self.soft_limit
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;

    /// Deterministic clock that expires after a fixed number of polls
    #[derive(Debug, Clone)]
    pub struct PollBudget {
        pub remaining: Option<u64>,
        pub polls: u64,
    }

    impl PollBudget {
        /// Never expires; only counts polls
        pub fn unlimited() -> Self {
            Self {
                remaining: None,
                polls: 0,
            }
        }

        /// Expires on the poll after `polls` successful ones
        pub fn limited(polls: u64) -> Self {
            Self {
                remaining: Some(polls),
                polls: 0,
            }
        }
    }

    impl Clock for PollBudget {
        fn is_running_out(&mut self) -> bool {
            match &mut self.remaining {
                Some(0) => true,
                Some(n) => {
                    *n -= 1;
                    self.polls += 1;
                    false
                }
                None => {
                    self.polls += 1;
                    false
                }
            }
        }
    }
}
