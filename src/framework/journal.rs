//! # Dinner Journal
//!
//! An optional, append-only record of everything the philosophers do.
//!
//! The journal exists so tests can *observe* the protocol instead of trusting it:
//! which fork was requested first, who held what and when, and that every seat
//! finished exactly once.
//!
//! ## Ordering guarantee
//!
//! Philosophers record [`DinnerEvent::Acquired`] right after taking a fork and
//! [`DinnerEvent::Released`] right before putting it down, both while still holding
//! the fork. The journal's own order is therefore consistent with fork ownership:
//! between an `Acquired` and the matching `Released` for fork `f`, no other seat can
//! appear as acquiring `f`. [`Journal::check_mutual_exclusion`] replays the log to
//! verify exactly that.

use crate::model::{ForkId, SeatId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One observable step of a philosopher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DinnerEvent {
    Thinking { seat: SeatId },
    Requesting { seat: SeatId, fork: ForkId },
    Acquired { seat: SeatId, fork: ForkId },
    Eating { seat: SeatId, meal: u64 },
    Released { seat: SeatId, fork: ForkId },
    Finished { seat: SeatId, meals: u64 },
}

impl DinnerEvent {
    pub fn seat(&self) -> SeatId {
        match self {
            DinnerEvent::Thinking { seat }
            | DinnerEvent::Requesting { seat, .. }
            | DinnerEvent::Acquired { seat, .. }
            | DinnerEvent::Eating { seat, .. }
            | DinnerEvent::Released { seat, .. }
            | DinnerEvent::Finished { seat, .. } => *seat,
        }
    }
}

/// Shared, cloneable event log.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<DinnerEvent>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: DinnerEvent) {
        self.lock().push(event);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the whole log, in recording order.
    pub fn snapshot(&self) -> Vec<DinnerEvent> {
        self.lock().clone()
    }

    /// Events of a single seat, in recording order.
    pub fn events_for(&self, seat: SeatId) -> Vec<DinnerEvent> {
        self.lock()
            .iter()
            .filter(|event| event.seat() == seat)
            .cloned()
            .collect()
    }

    /// Fork ids a seat requested, in the order it requested them.
    pub fn requests_of(&self, seat: SeatId) -> Vec<ForkId> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                DinnerEvent::Requesting { seat: s, fork } if *s == seat => Some(*fork),
                _ => None,
            })
            .collect()
    }

    /// Replays the log and returns the first point where a fork was acquired while
    /// somebody else still held it, or released by a seat that did not hold it.
    pub fn check_mutual_exclusion(&self) -> Result<(), String> {
        let mut held: HashMap<ForkId, SeatId> = HashMap::new();
        for (position, event) in self.lock().iter().enumerate() {
            match event {
                DinnerEvent::Acquired { seat, fork } => {
                    if let Some(other) = held.insert(*fork, *seat) {
                        return Err(format!(
                            "event {position}: seat {seat} acquired fork {fork} held by seat {other}"
                        ));
                    }
                }
                DinnerEvent::Released { seat, fork } => match held.remove(fork) {
                    Some(holder) if holder == *seat => {}
                    holder => {
                        return Err(format!(
                            "event {position}: seat {seat} released fork {fork} held by {holder:?}"
                        ));
                    }
                },
                _ => {}
            }
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DinnerEvent>> {
        // A panicking philosopher must not hide the rest of the log.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_for_filters_by_seat() {
        let journal = Journal::new();
        journal.record(DinnerEvent::Thinking { seat: SeatId(0) });
        journal.record(DinnerEvent::Thinking { seat: SeatId(1) });
        journal.record(DinnerEvent::Requesting { seat: SeatId(0), fork: ForkId(0) });

        assert_eq!(journal.len(), 3);
        assert_eq!(journal.events_for(SeatId(0)).len(), 2);
        assert_eq!(journal.requests_of(SeatId(0)), vec![ForkId(0)]);
        assert!(journal.requests_of(SeatId(1)).is_empty());
    }

    #[test]
    fn test_mutual_exclusion_check_accepts_clean_log() {
        let journal = Journal::new();
        journal.record(DinnerEvent::Acquired { seat: SeatId(0), fork: ForkId(1) });
        journal.record(DinnerEvent::Released { seat: SeatId(0), fork: ForkId(1) });
        journal.record(DinnerEvent::Acquired { seat: SeatId(1), fork: ForkId(1) });
        journal.record(DinnerEvent::Released { seat: SeatId(1), fork: ForkId(1) });

        assert!(journal.check_mutual_exclusion().is_ok());
    }

    #[test]
    fn test_mutual_exclusion_check_flags_overlap() {
        let journal = Journal::new();
        journal.record(DinnerEvent::Acquired { seat: SeatId(0), fork: ForkId(1) });
        journal.record(DinnerEvent::Acquired { seat: SeatId(1), fork: ForkId(1) });

        let err = journal.check_mutual_exclusion().unwrap_err();
        assert!(err.contains("held by seat 0"), "{err}");
    }

    #[test]
    fn test_clones_share_the_same_log() {
        let journal = Journal::new();
        let clone = journal.clone();
        clone.record(DinnerEvent::Finished { seat: SeatId(2), meals: 4 });
        assert_eq!(
            journal.snapshot(),
            vec![DinnerEvent::Finished { seat: SeatId(2), meals: 4 }]
        );
    }
}
