//! # Table Errors
//!
//! Two families of errors live here, and they are handled very differently:
//!
//! - [`TableError`] is returned through `Result` from the coordinator. Bad configuration
//!   and failed philosopher tasks end up here.
//! - [`ContractViolation`] is never returned. It describes a bug in the fork protocol
//!   (releasing a fork you do not hold, grabbing a fork twice) and is raised with
//!   `panic!`, so the offending task dies loudly and the join barrier reports it.

use crate::model::{ForkId, SeatId};
use crate::philosopher_actor::PhilosopherState;

/// Errors surfaced by [`Table`](crate::lifecycle::Table).
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TableError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Philosopher {seat} failed: {reason}")]
    PhilosopherFailed { seat: SeatId, reason: String },

    #[error("Fork {0} is still held after every philosopher finished")]
    ForkLeaked(ForkId),
}

/// Protocol bugs. Raised via `panic!`, never propagated as values.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ContractViolation {
    #[error("Philosopher {seat} tried to acquire fork {fork} which it already holds")]
    Reacquired { seat: SeatId, fork: ForkId },

    #[error("Philosopher {seat} released fork {fork} held by {holder:?}")]
    ForeignRelease {
        seat: SeatId,
        fork: ForkId,
        holder: Option<SeatId>,
    },

    #[error("Fork {fork} was locked by {seat} but already recorded as held by {holder}")]
    DoubleHold {
        seat: SeatId,
        fork: ForkId,
        holder: SeatId,
    },

    #[error("Philosopher {seat} cannot move from {from:?} to {to:?}")]
    IllegalTransition {
        seat: SeatId,
        from: PhilosopherState,
        to: PhilosopherState,
    },
}
