//! # Ring Topology
//!
//! The table is a cycle: `N` seats and `N` forks, where seat `i` sits between fork `i`
//! (its left) and fork `(i + 1) mod N` (its right). Fork `i` is therefore shared by
//! seat `i` and seat `(i - 1) mod N`.
//!
//! ## Why the ring is explicit
//!
//! This adjacency is the only source of deadlock in the system. If every seat grabbed
//! "left, then right", each seat could hold its left fork while waiting for its right
//! one, and the waits would close into a cycle. The [`Ring`] therefore owns the
//! adjacency *and* the acquisition order, so nothing else has to reason about
//! wraparound.
//!
//! ## Acquisition order
//!
//! [`Ring::acquisition_order`] always yields the lower fork id first. For every seat but
//! the last this is "left, then right". For seat `N-1` (forks `N-1` and `0`) it is fork
//! `0` first, then fork `N-1`. With a strict total order over forks, the wait-for graph
//! cannot contain a cycle.
//!
//! ```text
//!        fork 0
//!   seat 4      seat 0
//! fork 4          fork 1
//!   seat 3      seat 1
//!     fork 3  fork 2
//!         seat 2
//! ```

use crate::framework::TableError;
use crate::model::{ForkId, SeatId};

/// Cyclic seat/fork adjacency for a table of `N >= 2` seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ring {
    seats: usize,
}

impl Ring {
    pub fn new(seats: usize) -> Result<Self, TableError> {
        if seats < 2 {
            return Err(TableError::InvalidConfig(format!(
                "a ring needs at least 2 seats, got {seats}"
            )));
        }
        Ok(Self { seats })
    }

    pub fn len(&self) -> usize {
        self.seats
    }

    /// Always false: a ring has at least two seats.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn seats(&self) -> impl Iterator<Item = SeatId> {
        (0..self.seats).map(SeatId)
    }

    pub fn fork_ids(&self) -> impl Iterator<Item = ForkId> {
        (0..self.seats).map(ForkId)
    }

    /// `(left, right)` forks of a seat.
    pub fn forks_of(&self, seat: SeatId) -> (ForkId, ForkId) {
        let i = seat.index() % self.seats;
        (ForkId(i), ForkId((i + 1) % self.seats))
    }

    /// The two seats sharing a fork: the seat whose left fork it is, then the seat
    /// whose right fork it is.
    pub fn sharers_of(&self, fork: ForkId) -> (SeatId, SeatId) {
        let i = fork.index() % self.seats;
        (SeatId(i), SeatId((i + self.seats - 1) % self.seats))
    }

    /// The order in which `seat` must request its forks: lower id first.
    pub fn acquisition_order(&self, seat: SeatId) -> [ForkId; 2] {
        let (left, right) = self.forks_of(seat);
        if left < right {
            [left, right]
        } else {
            [right, left]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_rings() {
        assert!(Ring::new(0).is_err());
        assert!(Ring::new(1).is_err());
        assert!(Ring::new(2).is_ok());
    }

    #[test]
    fn test_forks_of_wraps_around() {
        let ring = Ring::new(5).unwrap();
        assert_eq!(ring.forks_of(SeatId(0)), (ForkId(0), ForkId(1)));
        assert_eq!(ring.forks_of(SeatId(3)), (ForkId(3), ForkId(4)));
        assert_eq!(ring.forks_of(SeatId(4)), (ForkId(4), ForkId(0)));
    }

    #[test]
    fn test_every_fork_is_shared_by_two_adjacent_seats() {
        let ring = Ring::new(5).unwrap();
        for fork in ring.fork_ids() {
            let (owner, neighbour) = ring.sharers_of(fork);
            assert_eq!(ring.forks_of(owner).0, fork);
            assert_eq!(ring.forks_of(neighbour).1, fork);
        }
        assert_eq!(ring.sharers_of(ForkId(0)), (SeatId(0), SeatId(4)));
    }

    #[test]
    fn test_acquisition_order_is_lower_id_first() {
        let ring = Ring::new(5).unwrap();
        for seat in ring.seats() {
            let [first, second] = ring.acquisition_order(seat);
            assert!(first < second, "seat {seat} requests {first} before {second}");
        }
        // The wraparound seat is the one that breaks "left then right".
        assert_eq!(ring.acquisition_order(SeatId(4)), [ForkId(0), ForkId(4)]);
    }

    #[test]
    fn test_two_seat_ring_shares_both_forks() {
        let ring = Ring::new(2).unwrap();
        assert_eq!(ring.forks_of(SeatId(0)), (ForkId(0), ForkId(1)));
        assert_eq!(ring.forks_of(SeatId(1)), (ForkId(1), ForkId(0)));
        assert_eq!(ring.acquisition_order(SeatId(0)), [ForkId(0), ForkId(1)]);
        assert_eq!(ring.acquisition_order(SeatId(1)), [ForkId(0), ForkId(1)]);
    }
}
