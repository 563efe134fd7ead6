//! # Table Lifecycle & Orchestration
//!
//! Individual philosophers are simple. Building the ring, starting everybody, and
//! stopping everybody *safely* is where the care goes, and that is this module's job.
//!
//! **Key Responsibilities:**
//! 1. **Construction** - [`Table::build`] allocates forks and binds philosophers
//! 2. **Context Injection** - each philosopher receives its shutdown listener, pacer and
//!    optional journal when it starts, not when it is built
//! 3. **Lifecycle Management** - [`Table::run`] spawns the tasks and broadcasts shutdown
//! 4. **Join Barrier** - `run` only returns once every philosopher task has exited
//! 5. **Observability Setup** - [`setup_tracing`]
//!
//! ## The Table Pattern
//!
//! ```rust,ignore
//! impl Table {
//!     pub async fn run(self, duration: Duration) -> Result<DinnerReport, TableError> {
//!         let (signal, _) = shutdown::channel();
//!         let handles: Vec<_> = self.philosophers.into_iter()
//!             .map(|p| tokio::spawn(p.dine(DinerContext::new(signal.listener(), pacer.clone()))))
//!             .collect();
//!
//!         tokio::time::sleep(duration).await;
//!         signal.trigger();
//!
//!         for handle in handles {
//!             handle.await?;
//!         }
//!     }
//! }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Raise the flag** - [`ShutdownSignal::trigger`](crate::framework::ShutdownSignal::trigger), once
//! 2. **Philosophers finish their cycle** - an eat phase in progress runs to completion
//!    and releases both forks
//! 3. **Checkpoint** - at the top of the next loop each philosopher sees the flag and returns
//! 4. **Await completion** - the table joins every task, then checks every fork is free
//!
//! A philosopher can never leave while holding a fork, so the fork ring is always
//! fully released by the time `run` returns.

pub mod config;
pub mod table;
pub mod tracing;

pub use config::*;
pub use table::*;
pub use self::tracing::setup_tracing;
