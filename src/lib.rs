#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Dining Table
//!
//! > **Bounded resource contention without deadlock, on Tokio.**
//!
//! `N` philosophers sit around a round table with `N` forks, one between each pair of
//! neighbours. A philosopher needs both adjacent forks to eat. Every fork is shared by
//! exactly two philosophers, and the sharing closes into a cycle, which is precisely the
//! shape that produces deadlock when everybody grabs "left, then right".
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Total order instead of clever scheduling
//!
//! Forks are acquired in increasing id order. That single rule makes the wait-for graph
//! acyclic: nobody ever holds a higher fork while waiting for a lower one. It needs no
//! waiter, no arbitration and no retry loop, and it works for every `N >= 2`.
//!
//! ### Cooperative shutdown
//!
//! The table raises a one-shot flag; philosophers look at it between cycles, when they
//! hold nothing. Nobody is ever cancelled mid-meal, so no fork is ever leaked.
//!
//! ### Join before reporting
//!
//! The table awaits every philosopher task before it reports completion. If one of them
//! panicked, the rest are still joined, and the first failure is returned.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! - **Key items**: [`Fork`](model::Fork), [`ForkGuard`](model::ForkGuard),
//!   [`SeatId`](model::SeatId), [`ForkId`](model::ForkId).
//!
//! ### 2. The Building Blocks ([`framework`])
//! - **Role**: topology, shutdown, pacing, observation and errors.
//! - **Key items**: [`Ring`](framework::Ring), [`ShutdownSignal`](framework::ShutdownSignal),
//!   [`Pacer`](framework::Pacer), [`Journal`](framework::Journal).
//!
//! ### 3. The Actor ([`philosopher_actor`])
//! - **Role**: the think / acquire / eat / release loop and its state machine.
//! - **Key items**: [`Philosopher`](philosopher_actor::Philosopher),
//!   [`PhilosopherState`](philosopher_actor::PhilosopherState).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: builds the table, runs the dinner, joins everybody.
//! - **Key items**: [`Table`](lifecycle::Table), [`TableConfig`](lifecycle::TableConfig),
//!   [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ### 5. The Baseline ([`stats`])
//! - **Role**: a contention-free parallel reduction, kept for timing comparison.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Five philosophers for five seconds
//! cargo run -- dine
//!
//! # The minimal cycle, with every fork request logged
//! RUST_LOG=trace cargo run -- dine --seats 2 --duration-ms 300
//!
//! # Statistics baseline
//! cargo run -- stats --records 100000 --workers 3
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod philosopher_actor;
pub mod stats;
