//! # Philosopher
//!
//! The concurrent unit of the table. A philosopher owns its seat id and shared handles
//! to its two forks, and loops until the table tells it to stop:
//!
//! ```text
//! loop {
//!     checkpoint: shutdown raised? -> finish
//!     think
//!     acquire lower fork, then higher fork
//!     eat
//!     release both
//! }
//! ```
//!
//! ## Deadlock avoidance
//!
//! The forks are never requested "left, then right". They are requested by id, lower
//! first (see [`Ring::acquisition_order`](crate::framework::Ring::acquisition_order)).
//! Since every philosopher climbs the same total order, no philosopher can hold a
//! higher fork while waiting on a lower one, and circular wait is impossible.
//!
//! ## Shutdown
//!
//! The shutdown flag is read exactly once per cycle, at the top of the loop, when no
//! fork is held. Think and eat phases always run to completion.

use crate::framework::{ContractViolation, DinnerEvent, Journal, Pacer, ShutdownListener};
use crate::model::{Fork, ForkGuard, SeatId};
use crate::philosopher_actor::PhilosopherState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Runtime dependencies injected into [`Philosopher::dine`].
#[derive(Clone)]
pub struct DinerContext {
    pub shutdown: ShutdownListener,
    pub pacer: Arc<dyn Pacer>,
    pub journal: Option<Journal>,
}

impl DinerContext {
    pub fn new(shutdown: ShutdownListener, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            shutdown,
            pacer,
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    fn record(&self, event: DinnerEvent) {
        if let Some(journal) = &self.journal {
            journal.record(event);
        }
    }
}

/// What a philosopher reports once it has left the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhilosopherOutcome {
    pub seat: SeatId,
    pub meals: u64,
}

/// A seat at the table, bound to its two adjacent forks.
pub struct Philosopher {
    seat: SeatId,
    left: Arc<Fork>,
    right: Arc<Fork>,
    meals: Arc<AtomicU64>,
    state: PhilosopherState,
}

impl Philosopher {
    pub fn new(seat: SeatId, left: Arc<Fork>, right: Arc<Fork>) -> Self {
        Self {
            seat,
            left,
            right,
            meals: Arc::new(AtomicU64::new(0)),
            state: PhilosopherState::Thinking,
        }
    }

    pub fn seat(&self) -> SeatId {
        self.seat
    }

    pub fn left(&self) -> &Arc<Fork> {
        &self.left
    }

    pub fn right(&self) -> &Arc<Fork> {
        &self.right
    }

    pub fn state(&self) -> PhilosopherState {
        self.state
    }

    /// Liveness counter: meals eaten so far. Readable while the philosopher runs.
    pub fn meals_counter(&self) -> Arc<AtomicU64> {
        self.meals.clone()
    }

    /// Forks in acquisition order: lower id first.
    pub fn ordered_forks(&self) -> (Arc<Fork>, Arc<Fork>) {
        if self.left.id() < self.right.id() {
            (self.left.clone(), self.right.clone())
        } else {
            (self.right.clone(), self.left.clone())
        }
    }

    /// Runs the think/eat loop until the shutdown flag is observed.
    pub async fn dine(mut self, ctx: DinerContext) -> PhilosopherOutcome {
        let seat = self.seat;
        debug!(%seat, left = %self.left.id(), right = %self.right.id(), "Philosopher seated");

        while !ctx.shutdown.is_triggered() {
            self.think(&ctx).await;
            self.eat(&ctx).await;
        }

        self.transition(PhilosopherState::Terminated);
        let meals = self.meals.load(Ordering::Acquire);
        info!(%seat, meals, "Philosopher finished");
        ctx.record(DinnerEvent::Finished { seat, meals });
        PhilosopherOutcome { seat, meals }
    }

    async fn think(&mut self, ctx: &DinerContext) {
        info!(seat = %self.seat, "Thinking");
        ctx.record(DinnerEvent::Thinking { seat: self.seat });
        ctx.pacer.think(self.seat).await;
    }

    /// One full acquire → eat → release cycle.
    async fn eat(&mut self, ctx: &DinerContext) {
        let (first, second) = self.ordered_forks();

        self.transition(PhilosopherState::AcquiringFirst);
        let first_guard = self.take(&first, ctx).await;

        self.transition(PhilosopherState::AcquiringSecond);
        let second_guard = self.take(&second, ctx).await;

        self.transition(PhilosopherState::Eating);
        let meal = self.meals.fetch_add(1, Ordering::AcqRel) + 1;
        info!(seat = %self.seat, meal, "Eating");
        ctx.record(DinnerEvent::Eating { seat: self.seat, meal });
        ctx.pacer.eat(self.seat).await;

        self.transition(PhilosopherState::Releasing);
        self.put_down(second_guard, ctx);
        self.put_down(first_guard, ctx);

        self.transition(PhilosopherState::Thinking);
    }

    async fn take<'f>(&self, fork: &'f Fork, ctx: &DinerContext) -> ForkGuard<'f> {
        trace!(seat = %self.seat, fork = %fork.id(), "Requesting fork");
        ctx.record(DinnerEvent::Requesting { seat: self.seat, fork: fork.id() });
        let guard = fork.acquire(self.seat).await;
        ctx.record(DinnerEvent::Acquired { seat: self.seat, fork: fork.id() });
        guard
    }

    fn put_down(&self, guard: ForkGuard<'_>, ctx: &DinerContext) {
        // Recorded while still holding, so the journal order matches ownership.
        ctx.record(DinnerEvent::Released { seat: self.seat, fork: guard.fork_id() });
        guard.release();
    }

    fn transition(&mut self, next: PhilosopherState) {
        if !self.state.can_transition_to(next) {
            panic!(
                "{}",
                ContractViolation::IllegalTransition {
                    seat: self.seat,
                    from: self.state,
                    to: next,
                }
            );
        }
        trace!(seat = %self.seat, from = ?self.state, to = ?next, holds_forks = next.holds_forks(), "Transition");
        self.state = next;
    }
}
