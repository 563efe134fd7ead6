use crate::framework::{shutdown, DinnerEvent, Journal, Pacer, RandomPacer, Ring, TableError};
use crate::lifecycle::TableConfig;
use crate::model::{Fork, ForkId, SeatId};
use crate::philosopher_actor::{self, DinerContext, Philosopher};
use serde::Serialize;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

/// The coordinator of the dinner.
///
/// `Table` is responsible for:
/// - **Construction**: allocating the fork ring and binding every philosopher to
///   its two forks, before any task exists
/// - **Lifecycle Management**: spawning one Tokio task per philosopher, broadcasting
///   shutdown once, and joining every task
/// - **Reporting**: summarising meals per seat and checking no fork was left held
///
/// The table never locks a fork itself. It only owns the forks (through `Arc`s shared
/// with the philosophers) and waits for the philosophers to finish.
///
/// # Example
///
/// ```ignore
/// let table = Table::build(TableConfig::default())?;
/// let report = table.run(Duration::from_secs(5)).await?;
/// assert!(report.all_forks_free);
/// ```
pub struct Table {
    config: TableConfig,
    ring: Ring,
    forks: Vec<Arc<Fork>>,
    philosophers: Vec<Philosopher>,
    pacer: Arc<dyn Pacer>,
    journal: Option<Journal>,
}

/// Summary returned by [`Table::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DinnerReport {
    pub seats: usize,
    /// Meals eaten, indexed by seat.
    pub meals: Vec<u64>,
    pub elapsed: Duration,
    pub all_forks_free: bool,
}

impl DinnerReport {
    pub fn total_meals(&self) -> u64 {
        self.meals.iter().sum()
    }

    pub fn meals_of(&self, seat: SeatId) -> u64 {
        self.meals.get(seat.index()).copied().unwrap_or(0)
    }
}

impl Table {
    /// Allocates the fork ring and seats the philosophers. Pure construction: no task
    /// is spawned until [`run`](Self::run).
    pub fn build(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let ring = Ring::new(config.seats)?;

        let forks: Vec<Arc<Fork>> = ring.fork_ids().map(|id| Arc::new(Fork::new(id))).collect();
        let philosophers = ring
            .seats()
            .map(|seat| philosopher_actor::new(&ring, seat, &forks))
            .collect();

        let pacer: Arc<dyn Pacer> = Arc::new(RandomPacer::new(config.think, config.eat));
        info!(seats = ring.len(), "Table built");

        Ok(Self {
            config,
            ring,
            forks,
            philosophers,
            pacer,
            journal: None,
        })
    }

    /// Replaces the default random pacer.
    pub fn with_pacer(mut self, pacer: impl Pacer) -> Self {
        self.pacer = Arc::new(pacer);
        self
    }

    /// Records every philosopher event into `journal`.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn forks(&self) -> &[Arc<Fork>] {
        &self.forks
    }

    pub fn philosophers(&self) -> &[Philosopher] {
        &self.philosophers
    }

    /// Liveness counters, indexed by seat. They keep counting while [`run`](Self::run)
    /// is in progress.
    pub fn meal_counters(&self) -> Vec<Arc<AtomicU64>> {
        self.philosophers.iter().map(Philosopher::meals_counter).collect()
    }

    /// Runs the dinner for `duration`, then shuts it down.
    ///
    /// This method:
    /// 1. Spawns every philosopher in its own Tokio task
    /// 2. Sleeps for `duration`
    /// 3. Raises the shutdown flag exactly once
    /// 4. Awaits **every** task, even after a failure, so no fork can be dropped while
    ///    a neighbour still holds it
    ///
    /// # Returns
    ///
    /// - `Ok(DinnerReport)` once every philosopher has left the table
    /// - `Err(TableError::PhilosopherFailed)` for the first task that panicked,
    ///   typically a
    ///   [`ContractViolation`](crate::framework::ContractViolation)
    /// - `Err(TableError::ForkLeaked)` if a fork is still held after the barrier
    pub async fn run(self, duration: Duration) -> Result<DinnerReport, TableError> {
        let seats = self.ring.len();
        let started = Instant::now();
        let (signal, _listener) = shutdown::channel();

        // =====================================================================
        // Step 1: Spawn one task per philosopher
        // =====================================================================

        let mut handles = Vec::with_capacity(seats);
        for philosopher in self.philosophers {
            let seat = philosopher.seat();
            let mut ctx = DinerContext::new(signal.listener(), self.pacer.clone());
            if let Some(journal) = &self.journal {
                ctx = ctx.with_journal(journal.clone());
            }
            handles.push((seat, tokio::spawn(philosopher.dine(ctx))));
        }
        info!(seats, duration_ms = duration.as_millis() as u64, "Dinner started");

        // =====================================================================
        // Step 2: Let them dine, then broadcast shutdown once
        // =====================================================================

        tokio::time::sleep(duration).await;
        signal.trigger();
        info!("Shutdown broadcast, waiting for philosophers to leave the table");

        // =====================================================================
        // Step 3: Join barrier
        // =====================================================================

        let mut meals = vec![0; seats];
        let mut first_failure = None;
        for (seat, handle) in handles {
            match handle.await {
                Ok(outcome) => meals[outcome.seat.index()] = outcome.meals,
                Err(e) => {
                    error!(%seat, error = %e, "Philosopher task failed");
                    first_failure.get_or_insert(TableError::PhilosopherFailed {
                        seat,
                        reason: e.to_string(),
                    });
                }
            }
        }
        if let Some(failure) = first_failure {
            return Err(failure);
        }

        if let Some(fork) = self.forks.iter().find(|fork| !fork.is_free()) {
            error!(fork = %fork.id(), holder = ?fork.holder(), "Fork still held after dinner");
            return Err(TableError::ForkLeaked(fork.id()));
        }

        let report = DinnerReport {
            seats,
            meals,
            elapsed: started.elapsed(),
            all_forks_free: true,
        };
        info!(
            total_meals = report.total_meals(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "All philosophers finished"
        );
        Ok(report)
    }
}

/// Fork ids held by anyone, in ring order. Empty after a clean [`Table::run`].
pub fn held_forks(forks: &[Arc<Fork>]) -> Vec<(ForkId, SeatId)> {
    forks
        .iter()
        .filter_map(|fork| fork.holder().map(|seat| (fork.id(), seat)))
        .collect()
}

/// Seats that reported finishing, per the journal, in finishing order.
pub fn finished_seats(journal: &Journal) -> Vec<SeatId> {
    journal
        .snapshot()
        .into_iter()
        .filter_map(|event| match event {
            DinnerEvent::Finished { seat, .. } => Some(seat),
            _ => None,
        })
        .collect()
}
