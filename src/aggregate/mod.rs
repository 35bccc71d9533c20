//! Grouping of incident records into daily and per-borough counts.
//!
//! Both aggregators are plain counters keyed by date or label. Counting is
//! associative and commutative, so a large record set can be split into
//! partitions, counted independently and combined with `merge`.

mod borough;
mod daily;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use borough::{aggregate_boroughs, BoroughAggregate, BoroughCounter};
pub use daily::{aggregate_daily, DailyAggregate, DailyCounter};

/// One incident as handed over by ingestion.
///
/// Records without an occurrence date are dropped upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Calendar date the incident occurred on.
    pub occurred_on: NaiveDate,
    /// Borough label as reported by the source.
    pub borough: String,
}

impl IncidentRecord {
    /// Create a record.
    pub fn new(occurred_on: NaiveDate, borough: impl Into<String>) -> Self {
        Self {
            occurred_on,
            borough: borough.into(),
        }
    }
}
