//! # Dining Table
//!
//! Command-line entry point.
//!
//! - `dine` runs the philosophers for a fixed wall-clock duration.
//! - `stats` runs the sequential and chunked average-age baselines and times them.
//!
//! Every flag can also be set through the environment variable shown in `--help`.

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use dining_table::framework::PhaseBounds;
use dining_table::lifecycle::{setup_tracing, Table, TableConfig};
use dining_table::stats::{self, BirthRecord, DateRange};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, Instrument};

#[derive(Debug, Parser)]
#[command(name = "dining-table", version, about = "Dining philosophers on Tokio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Seat the philosophers and let them dine.
    Dine(DineArgs),
    /// Average-age baseline: sequential vs chunked.
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
struct DineArgs {
    /// Number of philosophers (and forks).
    #[arg(long, env = "DINING_SEATS", default_value_t = 5)]
    seats: usize,

    /// How long the dinner lasts before shutdown is broadcast.
    #[arg(long, env = "DINING_DURATION_MS", default_value_t = 5000)]
    duration_ms: u64,

    #[arg(long, env = "DINING_THINK_MIN_MS", default_value_t = 0)]
    think_min_ms: u64,

    #[arg(long, env = "DINING_THINK_MAX_MS", default_value_t = 1000)]
    think_max_ms: u64,

    #[arg(long, env = "DINING_EAT_MIN_MS", default_value_t = 0)]
    eat_min_ms: u64,

    #[arg(long, env = "DINING_EAT_MAX_MS", default_value_t = 1000)]
    eat_max_ms: u64,
}

impl DineArgs {
    fn config(&self) -> TableConfig {
        TableConfig::new(
            self.seats,
            PhaseBounds::new(self.think_min_ms, self.think_max_ms),
            PhaseBounds::new(self.eat_min_ms, self.eat_max_ms),
        )
    }
}

#[derive(Debug, Args)]
struct StatsArgs {
    /// Number of synthetic birth records.
    #[arg(long, env = "STATS_RECORDS", default_value_t = 100_000)]
    records: usize,

    /// Worker tasks for the chunked variant.
    #[arg(long, env = "STATS_WORKERS", default_value_t = 3)]
    workers: usize,

    /// Seed for reproducible data.
    #[arg(long, env = "STATS_SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Dine(args) => dine(args).await,
        Command::Stats(args) => run_stats(args).await,
    }
}

async fn dine(args: DineArgs) -> Result<(), String> {
    let config = args.config();
    info!(?config, "Starting dinner");

    let table = Table::build(config).map_err(|e| e.to_string())?;
    let report = table
        .run(Duration::from_millis(args.duration_ms))
        .instrument(info_span!("dinner"))
        .await
        .map_err(|e| e.to_string())?;

    for (seat, meals) in report.meals.iter().enumerate() {
        info!(seat, meals, "Meals eaten");
    }
    info!("Dinner is over, every fork is back on the table");
    Ok(())
}

async fn run_stats(args: StatsArgs) -> Result<(), String> {
    let range = DateRange::new(date(2020, 1, 1)?, date(2023, 1, 1)?).map_err(|e| e.to_string())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let today = Utc::now().date_naive();
    let records: Arc<[BirthRecord]> =
        stats::generate_records(args.records, &range, today, &mut rng).into();
    info!(records = records.len(), "Records generated");

    let started = Instant::now();
    let sequential = stats::average_mother_age(&records, &range);
    let sequential_elapsed = started.elapsed();
    report_average("sequential", sequential, sequential_elapsed);

    let started = Instant::now();
    let chunked = stats::average_mother_age_chunked(records, range, args.workers)
        .await
        .map_err(|e| e.to_string())?;
    report_average("chunked", chunked, started.elapsed());

    Ok(())
}

fn report_average(variant: &str, average: Option<f64>, elapsed: Duration) {
    let elapsed_us = elapsed.as_micros() as u64;
    match average {
        Some(years) => info!(variant, average_years = years, elapsed_us, "Average mother age"),
        None => info!(variant, elapsed_us, "No births in the requested period"),
    }
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, String> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid date {year}-{month:02}-{day:02}"))
}
