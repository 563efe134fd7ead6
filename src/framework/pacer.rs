//! # Phase Pacing
//!
//! A [`Pacer`] decides how long a philosopher spends thinking and eating. Both phases
//! are plain sleeps: they never touch shared state, so they are the natural seam for
//! swapping timing strategies without touching the acquisition algorithm.
//!
//! - [`RandomPacer`] sleeps a uniformly random duration within [`PhaseBounds`].
//!   This is what the binary uses.
//! - [`YieldPacer`] does not sleep at all; it only yields to the scheduler. Every
//!   philosopher is then permanently contending for forks, which makes it the
//!   pacer of choice for deadlock stress tests.
//!
//! Phases always run to completion. Shutdown is observed between cycles, never
//! in the middle of a sleep.

use crate::framework::TableError;
use crate::model::SeatId;
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inclusive millisecond range for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBounds {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl PhaseBounds {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// `[0, 1000]` ms.
    pub fn up_to_one_second() -> Self {
        Self::new(0, 1000)
    }

    pub fn validate(&self, phase: &str) -> Result<(), TableError> {
        if self.min_ms > self.max_ms {
            return Err(TableError::InvalidConfig(format!(
                "{phase} bounds are inverted: min {} ms > max {} ms",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }

    /// Picks a duration inside the bounds.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }

    /// Upper bound of a single phase.
    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

/// Controls how long the think and eat phases take.
#[async_trait]
pub trait Pacer: Send + Sync + 'static {
    async fn think(&self, seat: SeatId);

    async fn eat(&self, seat: SeatId);
}

/// Random bounded sleeps.
#[derive(Debug, Clone)]
pub struct RandomPacer {
    think: PhaseBounds,
    eat: PhaseBounds,
}

impl RandomPacer {
    pub fn new(think: PhaseBounds, eat: PhaseBounds) -> Self {
        Self { think, eat }
    }

    fn pick(bounds: &PhaseBounds) -> Duration {
        // `ThreadRng` is not `Send`, so it must not live across the sleep.
        bounds.sample(&mut rand::thread_rng())
    }
}

#[async_trait]
impl Pacer for RandomPacer {
    async fn think(&self, _seat: SeatId) {
        tokio::time::sleep(Self::pick(&self.think)).await;
    }

    async fn eat(&self, _seat: SeatId) {
        tokio::time::sleep(Self::pick(&self.eat)).await;
    }
}

/// No sleeping, just a scheduler yield per phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldPacer;

#[async_trait]
impl Pacer for YieldPacer {
    async fn think(&self, _seat: SeatId) {
        tokio::task::yield_now().await;
    }

    async fn eat(&self, _seat: SeatId) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_stays_inside_bounds() {
        let bounds = PhaseBounds::new(10, 20);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let d = bounds.sample(&mut rng);
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn test_zero_width_bounds_are_valid() {
        let bounds = PhaseBounds::new(0, 0);
        assert!(bounds.validate("think").is_ok());
        assert_eq!(bounds.sample(&mut StdRng::seed_from_u64(1)), Duration::ZERO);
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let err = PhaseBounds::new(5, 1).validate("eat").unwrap_err();
        assert!(matches!(err, TableError::InvalidConfig(msg) if msg.contains("eat")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_pacer_sleeps_within_bounds() {
        let pacer = RandomPacer::new(PhaseBounds::new(100, 200), PhaseBounds::new(300, 300));

        let start = tokio::time::Instant::now();
        pacer.think(SeatId(0)).await;
        let thought = start.elapsed();
        assert!(thought >= Duration::from_millis(100) && thought <= Duration::from_millis(201));

        let start = tokio::time::Instant::now();
        pacer.eat(SeatId(0)).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
