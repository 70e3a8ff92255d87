//! Iteration counter
//!
//! Counts completed build-task executions within one watch session.

use std::fmt;

/// Number of completed task executions in a watch session.
///
/// Starts at zero before the first run and only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Iteration(u32);

impl Iteration {
    /// Counter before any task has run
    pub const ZERO: Iteration = Iteration(0);

    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The counter after one more completed execution
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Iteration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Iteration {
    fn from(count: u32) -> Self {
        Self(count)
    }
}
