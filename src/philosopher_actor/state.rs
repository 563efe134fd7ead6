//! Philosopher state machine.
//!
//! ```text
//! Thinking -> AcquiringFirst -> AcquiringSecond -> Eating -> Releasing -> Thinking
//!    |                                                                      |
//!    +---------------------------> Terminated <-----------------------------+
//! ```
//!
//! `Terminated` is only reachable from `Thinking`, the one state in which no fork
//! is held.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhilosopherState {
    Thinking,
    AcquiringFirst,
    AcquiringSecond,
    Eating,
    Releasing,
    Terminated,
}

impl PhilosopherState {
    pub fn can_transition_to(self, next: PhilosopherState) -> bool {
        use PhilosopherState::*;
        matches!(
            (self, next),
            (Thinking, AcquiringFirst)
                | (AcquiringFirst, AcquiringSecond)
                | (AcquiringSecond, Eating)
                | (Eating, Releasing)
                | (Releasing, Thinking)
                | (Thinking, Terminated)
        )
    }

    /// Whether forks may be held in this state.
    pub fn holds_forks(self) -> bool {
        matches!(
            self,
            PhilosopherState::AcquiringSecond | PhilosopherState::Eating | PhilosopherState::Releasing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PhilosopherState::*;

    #[test]
    fn test_full_cycle_is_allowed() {
        let cycle = [Thinking, AcquiringFirst, AcquiringSecond, Eating, Releasing, Thinking];
        for pair in cycle.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_termination_only_from_thinking() {
        assert!(Thinking.can_transition_to(Terminated));
        for state in [AcquiringFirst, AcquiringSecond, Eating, Releasing, Terminated] {
            assert!(!state.can_transition_to(Terminated), "{state:?}");
        }
    }

    #[test]
    fn test_cannot_skip_acquisition() {
        assert!(!Thinking.can_transition_to(Eating));
        assert!(!AcquiringFirst.can_transition_to(Eating));
        assert!(!Eating.can_transition_to(AcquiringFirst));
    }

    #[test]
    fn test_thinking_holds_nothing() {
        assert!(!Thinking.holds_forks());
        assert!(!Terminated.holds_forks());
        assert!(Eating.holds_forks());
    }
}
