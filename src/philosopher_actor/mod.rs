//! Philosopher actor: state machine and the dining loop.

pub mod philosopher;
pub mod state;

pub use philosopher::*;
pub use state::*;

use crate::framework::Ring;
use crate::model::{Fork, SeatId};
use std::sync::Arc;

/// Binds a seat to its two forks as laid out by the ring.
pub fn new(ring: &Ring, seat: SeatId, forks: &[Arc<Fork>]) -> Philosopher {
    let (left, right) = ring.forks_of(seat);
    Philosopher::new(
        seat,
        forks[left.index()].clone(),
        forks[right.index()].clone(),
    )
}
