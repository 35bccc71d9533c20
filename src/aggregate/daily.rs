//! Daily incident counts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::IncidentRecord;

/// Number of incidents on one calendar date.
///
/// Only dates with at least one incident exist; there is no zero-count row
/// for a quiet day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    /// The calendar date.
    pub date: NaiveDate,
    /// Incidents recorded on `date`.
    pub count: u64,
    /// Calendar month of `date` (1-12).
    pub month: u32,
}

impl DailyAggregate {
    /// Create an aggregate, deriving the month from the date.
    pub fn new(date: NaiveDate, count: u64) -> Self {
        Self {
            date,
            count,
            month: date.month(),
        }
    }
}

/// Accumulates per-date counts.
#[derive(Debug, Clone, Default)]
pub struct DailyCounter {
    counts: BTreeMap<NaiveDate, u64>,
}

impl DailyCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record.
    pub fn add(&mut self, record: &IncidentRecord) {
        *self.counts.entry(record.occurred_on).or_insert(0) += 1;
    }

    /// Count every record in `records`.
    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a IncidentRecord>,
    {
        for record in records {
            self.add(record);
        }
    }

    /// Fold the counts of another partition into this one.
    pub fn merge(&mut self, other: Self) {
        for (date, count) in other.counts {
            *self.counts.entry(date).or_insert(0) += count;
        }
    }

    /// Number of records counted so far.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Emit one aggregate per distinct date, ascending by date.
    pub fn finish(self) -> Vec<DailyAggregate> {
        self.counts
            .into_iter()
            .map(|(date, count)| DailyAggregate::new(date, count))
            .collect()
    }
}

/// Group records by occurrence date.
///
/// The output is sorted ascending by date and holds one entry per distinct
/// date. Empty input yields an empty vector.
pub fn aggregate_daily<'a, I>(records: I) -> Vec<DailyAggregate>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let mut counter = DailyCounter::new();
    counter.extend(records);
    counter.finish()
}
