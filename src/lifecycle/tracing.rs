//! # Observability & Tracing
//!
//! Console output of the dinner is plain `tracing` output. Every log line carries the
//! seat (and fork, where relevant) as structured fields, so a single philosopher can be
//! followed with a simple grep.
//!
//! ## Configuration
//!
//! [`setup_tracing`] uses a compact format without the module prefix
//! (`with_target(false)`). The level comes from `RUST_LOG` and falls back to `info`,
//! which is enough to see every "Thinking" / "Eating" / "Philosopher finished" line.
//!
//! ```bash
//! # Phase transitions (default)
//! cargo run -- dine
//!
//! # Add seating and shutdown details
//! RUST_LOG=debug cargo run -- dine
//!
//! # Every fork request, take and release
//! RUST_LOG=trace cargo run -- dine --seats 2 --duration-ms 500
//! ```
//!
//! ## Sample Output
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Table built seats=5
//! INFO Dinner started seats=5 duration_ms=5000
//! INFO Thinking seat=0
//! INFO Eating seat=0 meal=1
//! INFO Thinking seat=3
//! ...
//! INFO Shutdown broadcast, waiting for philosophers to leave the table
//! INFO Philosopher finished seat=2 meals=4
//! ...
//! INFO All philosophers finished total_meals=21 elapsed_ms=5712
//! ```
//!
//! **With `RUST_LOG=trace`** each meal is preceded by the fork traffic, which makes the
//! acquisition order visible:
//!
//! ```text
//! TRACE Requesting fork seat=4 fork=0
//! TRACE Fork taken fork=0 seat=4
//! TRACE Requesting fork seat=4 fork=4
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, from `main`.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
