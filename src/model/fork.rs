//! # Fork
//!
//! The exclusive resource shared by two neighbouring philosophers.
//!
//! A fork carries no business data. Its only state is "free" or "held by seat X":
//!
//! - The async [`Mutex`] is the sole mutation gate. Nobody touches the holder slot
//!   without owning the lock first.
//! - The `holder` slot is a diagnostic mirror of the lock, so tests and the
//!   coordinator can ask "who holds fork 3?" without taking the lock.
//!
//! Holding a fork is represented by a [`ForkGuard`]. Dropping the guard (or calling
//! [`ForkGuard::release`]) frees the fork, so a philosopher cannot forget to put a
//! fork back down.

use crate::framework::ContractViolation;
use crate::model::{ForkId, SeatId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, MutexGuard};
use tracing::trace;

const FREE: usize = usize::MAX;

/// An exclusive-access token in the ring.
#[derive(Debug)]
pub struct Fork {
    id: ForkId,
    lock: Mutex<()>,
    holder: AtomicUsize,
}

impl Fork {
    pub fn new(id: ForkId) -> Self {
        Self {
            id,
            lock: Mutex::new(()),
            holder: AtomicUsize::new(FREE),
        }
    }

    pub fn id(&self) -> ForkId {
        self.id
    }

    /// The seat currently holding this fork, if any.
    pub fn holder(&self) -> Option<SeatId> {
        match self.holder.load(Ordering::Acquire) {
            FREE => None,
            seat => Some(SeatId(seat)),
        }
    }

    pub fn is_free(&self) -> bool {
        self.holder().is_none()
    }

    /// Waits until the fork is free, then takes it on behalf of `seat`.
    ///
    /// # Panics
    /// If `seat` already holds this fork. Waiting on the lock in that case would
    /// block forever on ourselves.
    pub async fn acquire(&self, seat: SeatId) -> ForkGuard<'_> {
        // Only `seat` itself can have written its own id, so this read is reliable.
        if self.holder() == Some(seat) {
            panic!("{}", ContractViolation::Reacquired { seat, fork: self.id });
        }
        let lock = self.lock.lock().await;
        self.mark_held(seat, lock)
    }

    /// Takes the fork only if nobody holds it right now.
    pub fn try_acquire(&self, seat: SeatId) -> Option<ForkGuard<'_>> {
        if self.holder() == Some(seat) {
            panic!("{}", ContractViolation::Reacquired { seat, fork: self.id });
        }
        let lock = self.lock.try_lock().ok()?;
        Some(self.mark_held(seat, lock))
    }

    fn mark_held<'a>(&'a self, seat: SeatId, lock: MutexGuard<'a, ()>) -> ForkGuard<'a> {
        let previous = self.holder.swap(seat.index(), Ordering::AcqRel);
        if previous != FREE {
            panic!(
                "{}",
                ContractViolation::DoubleHold {
                    seat,
                    fork: self.id,
                    holder: SeatId(previous),
                }
            );
        }
        trace!(fork = %self.id, %seat, "Fork taken");
        ForkGuard {
            fork: self,
            seat,
            _lock: lock,
        }
    }

    /// Held → free. Must be called by the holder while it still owns the lock.
    fn release_by(&self, seat: SeatId) {
        if let Err(actual) =
            self.holder
                .compare_exchange(seat.index(), FREE, Ordering::AcqRel, Ordering::Acquire)
        {
            let violation = ContractViolation::ForeignRelease {
                seat,
                fork: self.id,
                holder: (actual != FREE).then_some(SeatId(actual)),
            };
            // A second panic during unwinding would abort the whole process.
            if !std::thread::panicking() {
                panic!("{violation}");
            }
            return;
        }
        trace!(fork = %self.id, %seat, "Fork released");
    }
}

/// Proof that a seat holds a fork.
///
/// The holder slot is cleared in `Drop::drop`, which runs before the inner mutex
/// guard is dropped, so the fork reads as free only once nobody can be inside it.
#[derive(Debug)]
pub struct ForkGuard<'a> {
    fork: &'a Fork,
    seat: SeatId,
    _lock: MutexGuard<'a, ()>,
}

impl ForkGuard<'_> {
    pub fn fork_id(&self) -> ForkId {
        self.fork.id
    }

    pub fn seat(&self) -> SeatId {
        self.seat
    }

    /// Puts the fork back on the table.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ForkGuard<'_> {
    fn drop(&mut self) {
        self.fork.release_by(self.seat);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_acquire_and_release_tracks_holder() {
        let fork = Fork::new(ForkId(2));
        assert!(fork.is_free());

        let guard = fork.acquire(SeatId(1)).await;
        assert_eq!(fork.holder(), Some(SeatId(1)));
        assert_eq!(guard.fork_id(), ForkId(2));

        guard.release();
        assert!(fork.is_free());
    }

    #[tokio::test]
    async fn test_try_acquire_fails_while_held() {
        let fork = Fork::new(ForkId(0));
        let guard = fork.try_acquire(SeatId(0)).expect("fork should be free");

        assert!(fork.try_acquire(SeatId(1)).is_none());

        drop(guard);
        let second = fork.try_acquire(SeatId(1));
        assert!(second.is_some());
    }

    #[tokio::test]
    async fn test_acquire_waits_for_neighbour() {
        let fork = Arc::new(Fork::new(ForkId(0)));
        let guard = fork.acquire(SeatId(0)).await;

        let waiter = {
            let fork = fork.clone();
            tokio::spawn(async move {
                let guard = fork.acquire(SeatId(4)).await;
                guard.seat()
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert_eq!(fork.holder(), Some(SeatId(0)));

        guard.release();
        assert_eq!(waiter.await.unwrap(), SeatId(4));
        assert!(fork.is_free());
    }

    #[tokio::test]
    #[should_panic(expected = "already holds")]
    async fn test_reacquire_by_holder_panics() {
        let fork = Fork::new(ForkId(1));
        let _guard = fork.acquire(SeatId(1)).await;
        let _again = fork.acquire(SeatId(1)).await;
    }

    #[test]
    #[should_panic(expected = "released fork 3")]
    fn test_release_by_non_holder_panics() {
        let fork = Fork::new(ForkId(3));
        fork.release_by(SeatId(2));
    }
}
