//! Strongly typed indices for seats and forks.
//!
//! Both are plain ring positions (`0..N-1`). Keeping them as distinct newtypes means
//! a fork index can never be passed where a seat index is expected, which matters
//! because the two rings are offset by one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a philosopher at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId(pub usize);

/// Position of a fork in the ring.
///
/// The derived `Ord` is the total order used for acquisition: lower id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ForkId(pub usize);

impl SeatId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ForkId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ForkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
