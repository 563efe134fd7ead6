//! Table configuration.
//!
//! The defaults reproduce the classic demo: five seats, think and eat phases of up to
//! one second each.

use crate::framework::{PhaseBounds, Ring, TableError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything needed to build a [`Table`](crate::lifecycle::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Number of philosophers, and therefore of forks. At least 2.
    pub seats: usize,
    pub think: PhaseBounds,
    pub eat: PhaseBounds,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seats: 5,
            think: PhaseBounds::up_to_one_second(),
            eat: PhaseBounds::up_to_one_second(),
        }
    }
}

impl TableConfig {
    pub fn new(seats: usize, think: PhaseBounds, eat: PhaseBounds) -> Self {
        Self { seats, think, eat }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        Ring::new(self.seats)?;
        self.think.validate("think")?;
        self.eat.validate("eat")?;
        Ok(())
    }

    /// Longest a single think + eat cycle can take, ignoring time spent waiting on forks.
    pub fn max_cycle(&self) -> Duration {
        self.think.max() + self.eat.max()
    }
}
