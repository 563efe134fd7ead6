//! # Statistics Baseline
//!
//! A contention-free comparison point for the dinner: the average age of mothers
//! whose child was born inside a date range, computed once sequentially and once split
//! across worker tasks.
//!
//! There is no shared mutable state here. Each worker reduces its own contiguous chunk
//! to an [`AgeTally`] and the tallies are merged afterwards, so the chunked result is
//! exactly the sequential one.

use chrono::{Days, Months, NaiveDate};
use rand::Rng;
use std::sync::Arc;
use tracing::debug;

const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StatsError {
    #[error("Date range is empty: {start} is not before {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
    #[error("At least one worker is required")]
    NoWorkers,
    #[error("Worker {index} failed: {reason}")]
    WorkerFailed { index: usize, reason: String },
}

/// One maternity ward entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthRecord {
    pub mother_name: String,
    pub mother_birth_date: NaiveDate,
    pub child_birth_date: NaiveDate,
}

impl BirthRecord {
    pub fn new(
        mother_name: impl Into<String>,
        mother_birth_date: NaiveDate,
        child_birth_date: NaiveDate,
    ) -> Self {
        Self {
            mother_name: mother_name.into(),
            mother_birth_date,
            child_birth_date,
        }
    }

    /// Mother's age at delivery, in days.
    pub fn age_at_birth_days(&self) -> i64 {
        (self.child_birth_date - self.mother_birth_date).num_days()
    }
}

/// Open interval `(start, end)`: both bounds are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StatsError> {
        if start >= end {
            return Err(StatsError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start && date < self.end
    }

    pub fn span_days(&self) -> u64 {
        (self.end - self.start).num_days().unsigned_abs()
    }
}

/// Partial reduction: summed ages and how many records matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeTally {
    pub total_days: i64,
    pub count: u64,
}

impl AgeTally {
    pub fn merge(self, other: AgeTally) -> AgeTally {
        AgeTally {
            total_days: self.total_days + other.total_days,
            count: self.count + other.count,
        }
    }

    /// Average age in years, `None` if nothing matched.
    pub fn average_years(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_days as f64 / self.count as f64 / DAYS_PER_YEAR)
    }
}

pub fn tally(records: &[BirthRecord], range: &DateRange) -> AgeTally {
    records
        .iter()
        .filter(|record| range.contains(record.child_birth_date))
        .fold(AgeTally::default(), |acc, record| AgeTally {
            total_days: acc.total_days + record.age_at_birth_days(),
            count: acc.count + 1,
        })
}

/// Single-threaded average mother age for births inside `range`.
pub fn average_mother_age(records: &[BirthRecord], range: &DateRange) -> Option<f64> {
    tally(records, range).average_years()
}

/// Same as [`average_mother_age`], with the records split into `workers` contiguous
/// chunks reduced on blocking tasks. The last chunk takes the remainder.
pub async fn average_mother_age_chunked(
    records: Arc<[BirthRecord]>,
    range: DateRange,
    workers: usize,
) -> Result<Option<f64>, StatsError> {
    if workers == 0 {
        return Err(StatsError::NoWorkers);
    }

    let chunk_size = records.len() / workers;
    let mut handles = Vec::with_capacity(workers);
    for index in 0..workers {
        let start = index * chunk_size;
        let end = if index == workers - 1 {
            records.len()
        } else {
            start + chunk_size
        };
        let records = records.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            tally(&records[start..end], &range)
        }));
    }

    let mut total = AgeTally::default();
    for (index, handle) in handles.into_iter().enumerate() {
        let part = handle.await.map_err(|e| StatsError::WorkerFailed {
            index,
            reason: e.to_string(),
        })?;
        debug!(index, matched = part.count, "Chunk reduced");
        total = total.merge(part);
    }
    Ok(total.average_years())
}

/// Synthetic records: mothers aged 18 to 45 at `today`, children born inside `range`.
pub fn generate_records<R: Rng>(
    count: usize,
    range: &DateRange,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<BirthRecord> {
    (0..count)
        .map(|index| {
            let years: u32 = rng.gen_range(18..46);
            let months: u32 = rng.gen_range(0..12);
            let days: u64 = rng.gen_range(0..31);
            let mother_birth_date = today
                .checked_sub_months(Months::new(years * 12 + months))
                .and_then(|date| date.checked_sub_days(Days::new(days)))
                .unwrap_or(today);

            let offset = rng.gen_range(0..range.span_days());
            let child_birth_date = range
                .start
                .checked_add_days(Days::new(offset))
                .unwrap_or(range.start);

            BirthRecord::new(format!("Mother {index}"), mother_birth_date, child_birth_date)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ward() -> Vec<BirthRecord> {
        vec![
            BirthRecord::new("Anna", date(1985, 5, 10), date(2023, 1, 15)),
            BirthRecord::new("Maria", date(1990, 8, 20), date(2023, 2, 20)),
            BirthRecord::new("Elena", date(1988, 3, 15), date(2023, 3, 10)),
            BirthRecord::new("Olga", date(1992, 11, 5), date(2023, 4, 5)),
            BirthRecord::new("Tatiana", date(1987, 7, 25), date(2023, 5, 1)),
        ]
    }

    fn first_quarter() -> DateRange {
        DateRange::new(date(2023, 1, 1), date(2023, 4, 1)).unwrap()
    }

    #[test]
    fn test_average_counts_only_births_inside_range() {
        let records = ward();
        let tally = tally(&records, &first_quarter());
        assert_eq!(tally.count, 3);

        let average = average_mother_age(&records, &first_quarter()).unwrap();
        assert!(average > 35.0 && average < 35.1, "{average}");
    }

    #[test]
    fn test_range_bounds_are_exclusive() {
        let range = first_quarter();
        assert!(!range.contains(date(2023, 1, 1)));
        assert!(!range.contains(date(2023, 4, 1)));
        assert!(range.contains(date(2023, 1, 2)));
    }

    #[test]
    fn test_no_match_yields_none() {
        let range = DateRange::new(date(2000, 1, 1), date(2000, 12, 31)).unwrap();
        assert_eq!(average_mother_age(&ward(), &range), None);
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let err = DateRange::new(date(2023, 4, 1), date(2023, 1, 1)).unwrap_err();
        assert!(matches!(err, StatsError::EmptyRange { .. }));
    }

    #[tokio::test]
    async fn test_chunked_matches_sequential() {
        let range = DateRange::new(date(2020, 1, 1), date(2023, 1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let records = generate_records(10_001, &range, date(2024, 6, 1), &mut rng);

        let sequential = average_mother_age(&records, &range);
        let records: Arc<[BirthRecord]> = records.into();
        for workers in [1, 3, 7] {
            let chunked = average_mother_age_chunked(records.clone(), range, workers)
                .await
                .unwrap();
            assert_eq!(chunked, sequential, "workers = {workers}");
        }
    }

    #[tokio::test]
    async fn test_more_workers_than_records() {
        let records: Arc<[BirthRecord]> = ward().into();
        let chunked = average_mother_age_chunked(records.clone(), first_quarter(), 8)
            .await
            .unwrap();
        assert_eq!(chunked, average_mother_age(&records, &first_quarter()));
    }

    #[tokio::test]
    async fn test_zero_workers_is_an_error() {
        let records: Arc<[BirthRecord]> = ward().into();
        let err = average_mother_age_chunked(records, first_quarter(), 0)
            .await
            .unwrap_err();
        assert_eq!(err, StatsError::NoWorkers);
    }

    #[test]
    fn test_generated_records_fall_inside_range() {
        let range = first_quarter();
        let today = date(2024, 1, 1);
        let mut rng = StdRng::seed_from_u64(3);
        for record in generate_records(500, &range, today, &mut rng) {
            assert!(record.child_birth_date >= date(2023, 1, 1));
            assert!(record.child_birth_date < date(2023, 4, 1));
            let age_years = (today - record.mother_birth_date).num_days() as f64 / DAYS_PER_YEAR;
            assert!((17.9..=46.1).contains(&age_years), "{age_years}");
        }
    }
}
