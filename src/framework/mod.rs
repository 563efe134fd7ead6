//! Building blocks the table is assembled from.
//!
//! # Main Components
//!
//! - [`Ring`] - cyclic seat/fork adjacency and the fork acquisition order
//! - [`ShutdownSignal`] / [`ShutdownListener`] - one-shot cooperative cancellation
//! - [`Pacer`] - how long think and eat phases take
//! - [`Journal`] - optional event log for observing the protocol
//! - [`TableError`] / [`ContractViolation`] - error types
//!
//! # Testing
//!
//! Attach a [`Journal`] and a [`YieldPacer`] to a table to stress the acquisition
//! protocol and inspect what happened afterwards.

pub mod error;
pub mod journal;
pub mod pacer;
pub mod ring;
pub mod shutdown;

pub use error::*;
pub use journal::*;
pub use pacer::*;
pub use ring::*;
pub use shutdown::{ShutdownListener, ShutdownSignal};
