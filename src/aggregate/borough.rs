//! Per-borough incident counts.

use std::collections::HashMap;

use serde::Serialize;

use super::IncidentRecord;

/// Number of incidents attributed to one borough label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoroughAggregate {
    /// Borough label, verbatim from the records.
    pub borough: String,
    /// Incidents with this label.
    pub count: u64,
}

/// Accumulates per-borough counts.
#[derive(Debug, Clone, Default)]
pub struct BoroughCounter {
    counts: HashMap<String, u64>,
}

impl BoroughCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record.
    pub fn add(&mut self, record: &IncidentRecord) {
        if let Some(count) = self.counts.get_mut(record.borough.as_str()) {
            *count += 1;
        } else {
            self.counts.insert(record.borough.clone(), 1);
        }
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
        for (borough, count) in other.counts {
            *self.counts.entry(borough).or_insert(0) += count;
        }
    }

    /// Emit the ranking: descending by count, ties broken by label.
    pub fn finish(self) -> Vec<BoroughAggregate> {
        let mut ranking: Vec<BoroughAggregate> = self
            .counts
            .into_iter()
            .map(|(borough, count)| BoroughAggregate { borough, count })
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.borough.cmp(&b.borough)));
        ranking
    }
}

/// Group records by borough label and rank by descending count.
pub fn aggregate_boroughs<'a, I>(records: I) -> Vec<BoroughAggregate>
where
    I: IntoIterator<Item = &'a IncidentRecord>,
{
    let mut counter = BoroughCounter::new();
    counter.extend(records);
    counter.finish()
}
